//! Token-based JavaScript beautifier.
//!
//! The beautifier works in two stages. A lexer splits the source into
//! tokens, keeping strings, template literals, comments and regex literals
//! verbatim. A printer then re-emits the token stream with uniform
//! indentation and spacing: 4-space indentation driven by brace depth,
//! statements on their own lines, spaces around binary operators, and
//! `}` glued to `else` / `catch` / `finally` / `while`.
//!
//! Formatting decisions depend only on the token stream and on line breaks
//! already present between statements, both of which the printer reproduces,
//! so beautifying already-beautified output is a no-op.

const INDENT: &str = "    ";

/// Keywords that keep a space before a following `(`.
const SPACED_KEYWORDS: &[&str] = &[
    "if", "for", "while", "switch", "catch", "return", "do", "else", "typeof", "in", "of", "new",
    "delete", "void", "instanceof", "case", "throw", "yield", "await", "function",
];

/// Keywords after which the next token sits in operand position, so a
/// following `/` starts a regex literal and `+`/`-` are unary.
const OPERAND_KEYWORDS: &[&str] = &[
    "return", "case", "typeof", "in", "of", "instanceof", "new", "delete", "void", "do", "else",
    "throw", "yield", "await",
];

/// Keywords after which a `{` opens an object literal rather than a block.
const VALUE_BRACE_KEYWORDS: &[&str] = &[
    "return", "case", "typeof", "in", "of", "instanceof", "new", "delete", "void", "throw",
    "yield", "await",
];

const MULTI_PUNCTS: &[&str] = &[
    ">>>=", "...", "===", "!==", "**=", "<<=", ">>=", ">>>", "&&=", "||=", "??=", "=>", "==",
    "!=", "<=", ">=", "&&", "||", "??", "?.", "++", "--", "+=", "-=", "*=", "/=", "%=", "&=",
    "|=", "^=", "<<", ">>", "**",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokKind {
    Word,
    Punct,
    Str,
    Regex,
    LineComment,
    BlockComment,
}

#[derive(Debug, Clone)]
struct Tok {
    kind: TokKind,
    text: String,
    /// At least one line break separated this token from the previous one.
    newline_before: bool,
    /// At least one blank line separated this token from the previous one.
    blank_before: bool,
}

/// The last token emitted by the printer, for spacing decisions.
#[derive(Debug, Clone)]
struct Prev {
    kind: TokKind,
    text: String,
}

/// Bracketing context the printer is currently inside of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ctx {
    /// A statement block `{ ... }`.
    Block,
    /// An object literal `{ ... }`.
    Object,
    /// Parentheses `( ... )`.
    Paren,
    /// Square brackets `[ ... ]`.
    Bracket,
}

/// Beautifies JavaScript source text.
pub fn beautify_js(content: &str) -> String {
    let toks = lex(content);

    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();
    let mut ctx: Vec<Ctx> = Vec::new();
    let mut ternary = 0usize;
    let mut glue_next = false;
    let mut pending_newline = false;
    let mut prev: Option<Prev> = None;

    let mut i = 0;
    while i < toks.len() {
        let t = &toks[i];
        let next = toks.get(i + 1);
        let prev_is_close_brace = prev
            .as_ref()
            .is_some_and(|p| p.kind == TokKind::Punct && p.text == "}");

        // `{}` stays on one line
        if t.kind == TokKind::Punct
            && t.text == "{"
            && next.is_some_and(|n| n.kind == TokKind::Punct && n.text == "}")
        {
            if pending_newline {
                start_line(&mut lines, &mut line, false, level_of(&ctx, false, false));
                pending_newline = false;
            } else if !line_blank(&line) && !glue_next {
                line.push(' ');
            }
            line.push_str("{}");
            glue_next = false;
            pending_newline = true;
            prev = Some(Prev {
                kind: TokKind::Punct,
                text: "}".to_string(),
            });
            i += 2;
            continue;
        }

        // tokens allowed to stay on the same line as a closing brace
        let glues_after_brace = prev_is_close_brace
            && match t.kind {
                TokKind::Word => {
                    matches!(t.text.as_str(), "else" | "catch" | "finally" | "while")
                }
                TokKind::Punct => matches!(
                    t.text.as_str(),
                    ")" | "]" | "," | ";" | "." | "?." | "(" | ":" | "=>"
                ),
                _ => false,
            };
        if glues_after_brace {
            pending_newline = false;
        }

        // trailing comments attach to the line they follow
        if matches!(t.kind, TokKind::LineComment | TokKind::BlockComment) && !t.newline_before {
            pending_newline = false;
        }

        // closers leave their context before the indent is computed
        let is_closer =
            t.kind == TokKind::Punct && matches!(t.text.as_str(), ")" | "]" | "}");
        if t.kind == TokKind::Punct {
            match t.text.as_str() {
                ")" if ctx.last() == Some(&Ctx::Paren) => {
                    ctx.pop();
                }
                "]" if ctx.last() == Some(&Ctx::Bracket) => {
                    ctx.pop();
                }
                "}" if matches!(ctx.last(), Some(Ctx::Block | Ctx::Object)) => {
                    ctx.pop();
                }
                _ => {}
            }
        }

        let force_newline = t.kind == TokKind::Punct && t.text == "}";
        let can_honor = !glues_after_brace
            && !(t.kind == TokKind::Punct && matches!(t.text.as_str(), "," | ";" | "{"));
        let nl = pending_newline || force_newline || (t.newline_before && can_honor);
        let blank = t.blank_before && nl && !is_closer;

        if nl {
            let continuation = t.kind == TokKind::Punct
                && (matches!(t.text.as_str(), "." | "?.") || is_binary_op(&t.text));
            start_line(
                &mut lines,
                &mut line,
                blank,
                level_of(&ctx, is_closer, continuation),
            );
            pending_newline = false;
        } else if !line_blank(&line) && !glue_next && !glues_left(t, prev.as_ref(), ternary) {
            line.push(' ');
        }
        line.push_str(&t.text);

        glue_next = t.kind == TokKind::Punct
            && (matches!(t.text.as_str(), "(" | "[" | "." | "?." | "!" | "~" | "...")
                || (matches!(t.text.as_str(), "++" | "--") && !is_postfix(prev.as_ref()))
                || (matches!(t.text.as_str(), "+" | "-") && operand_position(prev.as_ref())));

        if t.kind == TokKind::Punct {
            match t.text.as_str() {
                "(" => ctx.push(Ctx::Paren),
                "[" => ctx.push(Ctx::Bracket),
                "{" => {
                    ctx.push(if block_brace(prev.as_ref()) {
                        Ctx::Block
                    } else {
                        Ctx::Object
                    });
                    pending_newline = true;
                    ternary = 0;
                }
                "}" => {
                    pending_newline = true;
                    ternary = 0;
                }
                ";" => {
                    if !matches!(ctx.last(), Some(Ctx::Paren | Ctx::Bracket)) {
                        pending_newline = true;
                    }
                    ternary = 0;
                }
                "," => {
                    if ctx.last() == Some(&Ctx::Object) {
                        pending_newline = true;
                    }
                    ternary = 0;
                }
                "?" => ternary += 1,
                ":" => ternary = ternary.saturating_sub(1),
                _ => {}
            }
        }
        if t.kind == TokKind::LineComment || (t.kind == TokKind::BlockComment && t.newline_before)
        {
            pending_newline = true;
        }

        prev = Some(Prev {
            kind: t.kind,
            text: t.text.clone(),
        });
        i += 1;
    }

    if !line.trim().is_empty() {
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

/// Computes the indentation level for a fresh line.
///
/// Brace contexts each add one level. Lines inside parentheses or brackets,
/// and lines starting with a continuation operator, indent one extra level;
/// closers align with the level of their opener's line.
fn level_of(ctx: &[Ctx], is_closer: bool, continuation: bool) -> usize {
    let braces = ctx
        .iter()
        .filter(|c| matches!(c, Ctx::Block | Ctx::Object))
        .count();
    let extra = !is_closer
        && (matches!(ctx.last(), Some(Ctx::Paren | Ctx::Bracket)) || continuation);
    braces + usize::from(extra)
}

fn start_line(lines: &mut Vec<String>, line: &mut String, blank: bool, level: usize) {
    if !line.trim().is_empty() {
        lines.push(line.trim_end().to_string());
    }
    line.clear();
    if blank && !lines.is_empty() {
        lines.push(String::new());
    }
    for _ in 0..level {
        line.push_str(INDENT);
    }
}

fn line_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// True when the token attaches directly to the preceding text.
fn glues_left(t: &Tok, prev: Option<&Prev>, ternary: usize) -> bool {
    if t.kind != TokKind::Punct {
        return false;
    }
    match t.text.as_str() {
        ")" | "]" | "," | ";" | "." | "?." => true,
        ":" => ternary == 0,
        "++" | "--" => is_postfix(prev),
        "(" | "[" => is_callable(prev),
        _ => false,
    }
}

/// True when `++`/`--` after `prev` is a postfix operator.
fn is_postfix(prev: Option<&Prev>) -> bool {
    match prev {
        Some(p) => match p.kind {
            TokKind::Word => !OPERAND_KEYWORDS.contains(&p.text.as_str()),
            TokKind::Punct => matches!(p.text.as_str(), ")" | "]"),
            _ => false,
        },
        None => false,
    }
}

/// True when a `(` or `[` after `prev` is a call or index, not a grouping.
fn is_callable(prev: Option<&Prev>) -> bool {
    match prev {
        Some(p) => match p.kind {
            TokKind::Word => !SPACED_KEYWORDS.contains(&p.text.as_str()),
            TokKind::Punct => matches!(p.text.as_str(), ")" | "]"),
            TokKind::Str | TokKind::Regex => true,
            _ => false,
        },
        None => false,
    }
}

/// True when the next token sits in operand position (so `+`/`-` are unary).
fn operand_position(prev: Option<&Prev>) -> bool {
    match prev {
        None => true,
        Some(p) => match p.kind {
            TokKind::Punct => !matches!(p.text.as_str(), ")" | "]" | "++" | "--"),
            TokKind::Word => OPERAND_KEYWORDS.contains(&p.text.as_str()),
            _ => false,
        },
    }
}

/// True when a `{` after `prev` opens a statement block.
fn block_brace(prev: Option<&Prev>) -> bool {
    match prev {
        None => true,
        Some(p) => match p.kind {
            TokKind::Word => !VALUE_BRACE_KEYWORDS.contains(&p.text.as_str()),
            TokKind::Punct => matches!(p.text.as_str(), ")" | "]" | ";" | "{" | "}" | "=>"),
            _ => true,
        },
    }
}

fn is_binary_op(p: &str) -> bool {
    matches!(
        p,
        "=" | "=="
            | "==="
            | "!="
            | "!=="
            | "<"
            | ">"
            | "<="
            | ">="
            | "+"
            | "-"
            | "*"
            | "/"
            | "%"
            | "**"
            | "&&"
            | "||"
            | "??"
            | "&"
            | "|"
            | "^"
            | "<<"
            | ">>"
            | ">>>"
            | "+="
            | "-="
            | "*="
            | "/="
            | "%="
            | "**="
            | "&="
            | "|="
            | "^="
            | "<<="
            | ">>="
            | ">>>="
            | "&&="
            | "||="
            | "??="
            | "=>"
    )
}

fn lex(src: &str) -> Vec<Tok> {
    let chars: Vec<char> = src.chars().collect();
    let mut toks: Vec<Tok> = Vec::new();
    let mut i = 0;
    let mut newlines = 0usize;
    // last non-comment token, used to disambiguate regex literals
    let mut prev_code: Option<(TokKind, String)> = None;

    while i < chars.len() {
        let c = chars[i];
        if c == '\n' {
            newlines += 1;
            i += 1;
            continue;
        }
        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let newline_before = newlines > 0;
        let blank_before = newlines > 1;
        newlines = 0;
        let start = i;
        let kind;

        if c == '/' && chars.get(i + 1) == Some(&'/') {
            while i < chars.len() && chars[i] != '\n' {
                i += 1;
            }
            kind = TokKind::LineComment;
        } else if c == '/' && chars.get(i + 1) == Some(&'*') {
            i += 2;
            while i < chars.len() && !(chars[i] == '*' && chars.get(i + 1) == Some(&'/')) {
                i += 1;
            }
            i = (i + 2).min(chars.len());
            kind = TokKind::BlockComment;
        } else if c == '"' || c == '\'' {
            i += 1;
            while i < chars.len() && chars[i] != c && chars[i] != '\n' {
                if chars[i] == '\\' {
                    i += 1;
                }
                i += 1;
            }
            if i < chars.len() && chars[i] == c {
                i += 1;
            }
            kind = TokKind::Str;
        } else if c == '`' {
            i = lex_template(&chars, i);
            kind = TokKind::Str;
        } else if c == '/'
            && regex_position(prev_code.as_ref())
            && let Some(end) = lex_regex(&chars, i)
        {
            i = end;
            kind = TokKind::Regex;
        } else if c.is_ascii_digit()
            || (c == '.' && chars.get(i + 1).is_some_and(|d| d.is_ascii_digit()))
        {
            i = lex_number(&chars, i);
            kind = TokKind::Word;
        } else if c.is_alphabetic() || c == '_' || c == '$' {
            i += 1;
            while i < chars.len()
                && (chars[i].is_alphanumeric() || chars[i] == '_' || chars[i] == '$')
            {
                i += 1;
            }
            kind = TokKind::Word;
        } else {
            i += punct_len(&chars, i);
            kind = TokKind::Punct;
        }

        let text: String = chars[start..i].iter().collect();
        if !matches!(kind, TokKind::LineComment | TokKind::BlockComment) {
            prev_code = Some((kind, text.clone()));
        }
        toks.push(Tok {
            kind,
            text,
            newline_before,
            blank_before,
        });
    }
    toks
}

/// True when a `/` after the given token starts a regex literal.
fn regex_position(prev: Option<&(TokKind, String)>) -> bool {
    match prev {
        None => true,
        Some((TokKind::Punct, p)) => !matches!(p.as_str(), ")" | "]" | "++" | "--"),
        Some((TokKind::Word, w)) => OPERAND_KEYWORDS.contains(&w.as_str()),
        Some(_) => false,
    }
}

/// Scans a regex literal starting at the `/`. Returns the end index, or
/// `None` if no closing `/` is found on the same line (then the `/` is a
/// division operator after all).
fn lex_regex(chars: &[char], start: usize) -> Option<usize> {
    let mut i = start + 1;
    let mut in_class = false;
    while i < chars.len() {
        match chars[i] {
            '\\' => i += 1,
            '\n' => return None,
            '[' => in_class = true,
            ']' => in_class = false,
            '/' if !in_class => {
                i += 1;
                while i < chars.len() && chars[i].is_alphabetic() {
                    i += 1;
                }
                return Some(i);
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Scans a template literal, tracking `${ ... }` interpolation braces.
fn lex_template(chars: &[char], start: usize) -> usize {
    let mut i = start + 1;
    let mut interp_depth = 0usize;
    while i < chars.len() {
        match chars[i] {
            '\\' => i += 1,
            '$' if interp_depth == 0 && chars.get(i + 1) == Some(&'{') => {
                interp_depth = 1;
                i += 1;
            }
            '{' if interp_depth > 0 => interp_depth += 1,
            '}' if interp_depth > 0 => interp_depth -= 1,
            '`' if interp_depth == 0 => return i + 1,
            _ => {}
        }
        i += 1;
    }
    chars.len()
}

fn lex_number(chars: &[char], start: usize) -> usize {
    let mut i = start + 1;
    while i < chars.len() {
        let c = chars[i];
        if c.is_alphanumeric() || c == '_' || c == '.' {
            i += 1;
        } else if (c == '+' || c == '-') && matches!(chars[i - 1], 'e' | 'E') {
            i += 1;
        } else {
            break;
        }
    }
    i
}

fn punct_len(chars: &[char], start: usize) -> usize {
    for p in MULTI_PUNCTS {
        let pc: Vec<char> = p.chars().collect();
        if chars.len() - start >= pc.len() && chars[start..start + pc.len()] == pc[..] {
            return pc.len();
        }
    }
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spaces_around_assignment() {
        assert_eq!(beautify_js("var a=1;"), "var a = 1;");
    }

    #[test]
    fn test_if_else_blocks() {
        assert_eq!(
            beautify_js("if(x){y();}else{z();}"),
            "if (x) {\n    y();\n} else {\n    z();\n}"
        );
    }

    #[test]
    fn test_object_literal_expands() {
        assert_eq!(
            beautify_js("var o={a:1,b:2};"),
            "var o = {\n    a: 1,\n    b: 2\n};"
        );
    }

    #[test]
    fn test_function_declaration() {
        assert_eq!(
            beautify_js("function add(a,b){return a+b;}"),
            "function add(a, b) {\n    return a + b;\n}"
        );
    }

    #[test]
    fn test_arrow_callback() {
        assert_eq!(
            beautify_js("items.map((item)=>{return item.id;});"),
            "items.map((item) => {\n    return item.id;\n});"
        );
    }

    #[test]
    fn test_string_content_preserved() {
        assert_eq!(beautify_js("x=\"a  b\";"), "x = \"a  b\";");
        assert_eq!(beautify_js("y='it\\'s';"), "y = 'it\\'s';");
    }

    #[test]
    fn test_regex_literal_preserved() {
        assert_eq!(beautify_js("var r=/ab+c/g;"), "var r = /ab+c/g;");
    }

    #[test]
    fn test_slash_after_value_is_division() {
        assert_eq!(beautify_js("var h=(a)/b;"), "var h = (a) / b;");
    }

    #[test]
    fn test_unary_minus_attaches() {
        assert_eq!(beautify_js("var x=-1;"), "var x = -1;");
        assert_eq!(beautify_js("f(-2,!b);"), "f(-2, !b);");
    }

    #[test]
    fn test_postfix_increment_attaches() {
        assert_eq!(
            beautify_js("for(i=0;i<n;i++){go();}"),
            "for (i = 0; i < n; i++) {\n    go();\n}"
        );
    }

    #[test]
    fn test_empty_braces_stay_inline() {
        assert_eq!(beautify_js("function noop() {}"), "function noop() {}");
        assert_eq!(beautify_js("var empty={};"), "var empty = {};");
    }

    #[test]
    fn test_line_comment_placement() {
        assert_eq!(
            beautify_js("x=1; // note\ny=2;"),
            "x = 1; // note\ny = 2;"
        );
        assert_eq!(beautify_js("// top\nx=1;"), "// top\nx = 1;");
    }

    #[test]
    fn test_blank_lines_collapse_to_one() {
        assert_eq!(beautify_js("a();\n\n\n\nb();"), "a();\n\nb();");
    }

    #[test]
    fn test_ternary_gets_spaces() {
        assert_eq!(beautify_js("var t=a?b:c;"), "var t = a ? b : c;");
    }

    #[test]
    fn test_multiline_array_preserved() {
        assert_eq!(
            beautify_js("var a=[\n1,\n2\n];"),
            "var a = [\n    1,\n    2\n];"
        );
        assert_eq!(beautify_js("var b=[1,2];"), "var b = [1, 2];");
    }

    #[test]
    fn test_template_literal_preserved() {
        assert_eq!(
            beautify_js("var s=`a ${x + 1} b`;"),
            "var s = `a ${x + 1} b`;"
        );
    }

    #[test]
    fn test_idempotent() {
        let src = "function greet(name){if(!name){return null;}var msg={text:`hi ${name}`,seen:false};\n\nreturn msg;}";
        let once = beautify_js(src);
        let twice = beautify_js(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_do_while_glues() {
        assert_eq!(
            beautify_js("do{a();}while(x);"),
            "do {\n    a();\n} while (x);"
        );
    }
}
