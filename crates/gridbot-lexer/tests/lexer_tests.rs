//! Lexer integration tests over realistic learner programs.

use gridbot_lexer::{instruction_lines, Lexer, TokenKind};
use gridbot_types::{DiagCode, SourceFile};

fn kinds(source: &str) -> Vec<TokenKind> {
    let source_file = SourceFile::new("lesson.gb", source);
    Lexer::new(&source_file)
        .lex()
        .tokens
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

#[test]
fn test_full_lesson_program() {
    let source = "// reach the corner\nlet n = 4\nrepeat n {\n  moveRight()\n}\n";
    let got = kinds(source);
    let want = vec![
        TokenKind::Newline,
        TokenKind::Let,
        TokenKind::Identifier("n".into()),
        TokenKind::Eq,
        TokenKind::Number(4),
        TokenKind::Newline,
        TokenKind::Repeat,
        TokenKind::Identifier("n".into()),
        TokenKind::LBrace,
        TokenKind::Newline,
        TokenKind::Identifier("moveRight".into()),
        TokenKind::LParen,
        TokenKind::RParen,
        TokenKind::Newline,
        TokenKind::RBrace,
        TokenKind::Newline,
        TokenKind::Eof,
    ];
    assert_eq!(got, want);
}

#[test]
fn test_move_names_stay_identifiers() {
    // The dispatcher owns the move vocabulary; the lexer must not.
    for name in ["moveUp", "moveDown", "moveLeft", "moveRight"] {
        let got = kinds(name);
        assert_eq!(got[0], TokenKind::Identifier(name.into()));
    }
}

#[test]
fn test_scan_never_aborts() {
    let source_file = SourceFile::new("lesson.gb", "m@ve#Right$()\nmoveDown()\n");
    let result = Lexer::new(&source_file).lex();
    assert_eq!(result.diagnostics.total, 3);
    for diag in &result.diagnostics.entries {
        assert_eq!(diag.code, DiagCode::UNEXPECTED_TOKEN);
    }
    // Everything scannable is still in the stream.
    let kinds: Vec<_> = result.tokens.iter().map(|t| &t.kind).collect();
    assert!(kinds.contains(&&TokenKind::Identifier("moveDown".into())));
}

#[test]
fn test_instruction_lines_match_scanner_view() {
    let source = "moveRight()\n// comment line\n\n  moveDown()\n";
    let lines = instruction_lines(source);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].number, 1);
    assert_eq!(lines[1].number, 4);

    // The scanner agrees on how many call lines exist.
    let calls = kinds(source)
        .iter()
        .filter(|k| matches!(k, TokenKind::Identifier(_)))
        .count();
    assert_eq!(calls, lines.len());
}

#[test]
fn test_crlf_source() {
    let got = kinds("moveUp()\r\nmoveDown()\r\n");
    assert_eq!(
        got,
        vec![
            TokenKind::Identifier("moveUp".into()),
            TokenKind::LParen,
            TokenKind::RParen,
            TokenKind::Newline,
            TokenKind::Identifier("moveDown".into()),
            TokenKind::LParen,
            TokenKind::RParen,
            TokenKind::Newline,
            TokenKind::Eof,
        ]
    );
}
