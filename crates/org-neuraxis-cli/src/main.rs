use anyhow::{Context, Result};
use org_neuraxis_config::Config;
use org_neuraxis_syntax::{LexedToken, SyntaxNode, parse_with};
use rowan::NodeOrToken;
use std::fmt::Write;
use std::{env, fs, path::PathBuf, process};

enum Output {
    Tree,
    Tokens,
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map_or("org-neuraxis-cli", String::as_str);
    let (path, output) = match parse_args(args.get(1..).unwrap_or(&[])) {
        Some(parsed) => parsed,
        None => {
            eprintln!("Usage: {program} <file.org> [--tokens]");
            eprintln!("  Prints the syntax tree of an org file, or its token stream with --tokens");
            process::exit(1);
        }
    };

    let text = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let config = match Config::load() {
        Ok(Some(config)) => {
            log::info!("Loaded config from {}", Config::config_path().display());
            config
        }
        Ok(None) => Config::default(),
        Err(e) => {
            log::warn!("{e}; using default keywords");
            Config::default()
        }
    };
    let engine = config
        .with_in_buffer(&text)
        .engine()
        .context("Invalid keyword configuration")?;

    let parsed = parse_with(&engine, &text);
    let dump = match output {
        Output::Tree => format_tree(&parsed.syntax()),
        Output::Tokens => format_tokens(&text, parsed.tokens()),
    };
    print!("{dump}");
    Ok(())
}

fn parse_args(args: &[String]) -> Option<(PathBuf, Output)> {
    match args {
        [path] => Some((PathBuf::from(path), Output::Tree)),
        [path, flag] | [flag, path] if flag == "--tokens" => {
            Some((PathBuf::from(path), Output::Tokens))
        }
        _ => None,
    }
}

/// One line per node or token, children indented under their parent.
fn format_tree(root: &SyntaxNode) -> String {
    let mut out = String::new();
    let mut depth = 0;
    for event in root.preorder_with_tokens() {
        match event {
            rowan::WalkEvent::Enter(element) => {
                let indent = "  ".repeat(depth);
                match element {
                    NodeOrToken::Node(node) => {
                        let _ = writeln!(out, "{indent}{:?}@{:?}", node.kind(), node.text_range());
                        depth += 1;
                    }
                    NodeOrToken::Token(token) => {
                        let _ = writeln!(
                            out,
                            "{indent}{:?}@{:?} {:?}",
                            token.kind(),
                            token.text_range(),
                            token.text()
                        );
                    }
                }
            }
            rowan::WalkEvent::Leave(NodeOrToken::Node(_)) => depth -= 1,
            rowan::WalkEvent::Leave(NodeOrToken::Token(_)) => {}
        }
    }
    out
}

fn format_tokens(text: &str, tokens: &[LexedToken]) -> String {
    let mut out = String::new();
    for token in tokens {
        let _ = writeln!(
            out,
            "{:?}@{}..{} {:?}",
            token.kind,
            token.range.start,
            token.range.end,
            &text[token.range.clone()]
        );
    }
    out
}
