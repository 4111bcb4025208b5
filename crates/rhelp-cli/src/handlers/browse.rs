//! Interactive browse session.
//!
//! A line-oriented stand-in for a help panel: pages go to the terminal view,
//! and typed commands replace clicks and mouse buttons.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use rhelp_core::{HelpError, HelpPanel, NavButton, PanelError, PanelMessage};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::TerminalView;
use crate::utils::input::{prompt_line, prompt_string_with_default};

const DEFAULT_PACKAGE: &str = "utils";
const DEFAULT_FUNCTION: &str = "help";

const USAGE: &str = "\
Commands:
  back | b              previous page
  forward | f           next page
  links | l             list links on the current page
  open <n | href>       follow link number n or an href
  help <topic> [pkg]    show a topic (pkg defaults to the current package)
  quit | q              leave";

/// A parsed browse command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Back,
    Forward,
    Links,
    Open(String),
    Help {
        topic: String,
        package: Option<String>,
    },
    Quit,
    Usage,
    Empty,
    Unknown(String),
}

/// Parse one input line.
pub fn parse_command(line: &str) -> BrowseCommand {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return BrowseCommand::Empty;
    };
    let args: Vec<&str> = words.collect();

    match (command, args.as_slice()) {
        ("back" | "b", []) => BrowseCommand::Back,
        ("forward" | "f", []) => BrowseCommand::Forward,
        ("links" | "l", []) => BrowseCommand::Links,
        ("open" | "o", [target]) => BrowseCommand::Open((*target).to_string()),
        ("help" | "h", [topic]) => BrowseCommand::Help {
            topic: (*topic).to_string(),
            package: None,
        },
        ("help" | "h", [topic, package]) => BrowseCommand::Help {
            topic: (*topic).to_string(),
            package: Some((*package).to_string()),
        },
        ("quit" | "q" | "exit", []) => BrowseCommand::Quit,
        ("?" | "usage", []) => BrowseCommand::Usage,
        _ => BrowseCommand::Unknown(line.trim().to_string()),
    }
}

/// Resolve an `open` argument: a link number from the last `links`
/// listing, or an href as-is.
pub fn resolve_open_target(target: &str, links: &[String]) -> Option<String> {
    match target.parse::<usize>() {
        Ok(index) => index.checked_sub(1).and_then(|i| links.get(i)).cloned(),
        Err(_) => Some(target.to_string()),
    }
}

pub async fn execute(ctx: &CliContext, output: Option<PathBuf>) -> Result<()> {
    let view = Arc::new(TerminalView::interactive(output));
    let mut panel = HelpPanel::new(ctx.provider(), view);

    let package = prompt_string_with_default("Package name", Some(DEFAULT_PACKAGE))?;
    let function = prompt_string_with_default("Function name", Some(DEFAULT_FUNCTION))?;
    report(panel.show_help(&function, Some(&package)).await)?;
    eprintln!("{USAGE}");

    while let Some(line) = prompt_line("rhelp> ")? {
        match parse_command(&line) {
            BrowseCommand::Back => {
                let moved = panel
                    .handle_message(PanelMessage::NavigationButton {
                        button: NavButton::Back,
                    })
                    .await;
                if !report(moved)? {
                    eprintln!("Already at the oldest page");
                }
            }
            BrowseCommand::Forward => {
                let moved = panel
                    .handle_message(PanelMessage::NavigationButton {
                        button: NavButton::Forward,
                    })
                    .await;
                if !report(moved)? {
                    eprintln!("Already at the newest page");
                }
            }
            BrowseCommand::Links => {
                for (index, link) in panel.current_links().iter().enumerate() {
                    eprintln!("{:>3}  {link}", index + 1);
                }
            }
            BrowseCommand::Open(target) => {
                match resolve_open_target(&target, &panel.current_links()) {
                    Some(href) => {
                        report(
                            panel
                                .handle_message(PanelMessage::LinkClicked { href })
                                .await,
                        )?;
                    }
                    None => eprintln!("No link number {target}"),
                }
            }
            BrowseCommand::Help { topic, package } => {
                report(panel.show_help(&topic, package.as_deref()).await)?;
            }
            BrowseCommand::Quit => break,
            BrowseCommand::Usage => eprintln!("{USAGE}"),
            BrowseCommand::Empty => {}
            BrowseCommand::Unknown(input) => {
                eprintln!("Unknown command: {input}");
                eprintln!("{USAGE}");
            }
        }
    }

    Ok(())
}

/// Print recoverable panel errors and keep the session going. Errors that
/// leave the provider unusable end the session.
fn report(result: Result<bool, PanelError>) -> Result<bool> {
    match result {
        Ok(changed) => Ok(changed),
        Err(PanelError::Provider(
            err @ (HelpError::Disposed | HelpError::ServerStart(_) | HelpError::Configuration(_)),
        )) => Err(CliError::from(err).into()),
        Err(err) => {
            eprintln!("{err}");
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_navigation() {
        assert_eq!(parse_command("back"), BrowseCommand::Back);
        assert_eq!(parse_command(" f "), BrowseCommand::Forward);
        assert_eq!(parse_command("links"), BrowseCommand::Links);
        assert_eq!(parse_command("q"), BrowseCommand::Quit);
        assert_eq!(parse_command(""), BrowseCommand::Empty);
    }

    #[test]
    fn test_parse_help_and_open() {
        assert_eq!(
            parse_command("help lm stats"),
            BrowseCommand::Help {
                topic: "lm".to_string(),
                package: Some("stats".to_string()),
            }
        );
        assert_eq!(
            parse_command("help mean"),
            BrowseCommand::Help {
                topic: "mean".to_string(),
                package: None,
            }
        );
        assert_eq!(
            parse_command("open ../../base/html/mean.html"),
            BrowseCommand::Open("../../base/html/mean.html".to_string())
        );
    }

    #[test]
    fn test_parse_rejects_bad_arity() {
        assert!(matches!(parse_command("back 2"), BrowseCommand::Unknown(_)));
        assert!(matches!(parse_command("open"), BrowseCommand::Unknown(_)));
        assert!(matches!(parse_command("help a b c"), BrowseCommand::Unknown(_)));
    }

    #[test]
    fn test_open_target_by_number_or_href() {
        let links = vec!["a.html".to_string(), "b.html".to_string()];
        assert_eq!(resolve_open_target("2", &links), Some("b.html".to_string()));
        assert_eq!(resolve_open_target("0", &links), None);
        assert_eq!(resolve_open_target("3", &links), None);
        assert_eq!(
            resolve_open_target("library/x/html/y.html", &links),
            Some("library/x/html/y.html".to_string())
        );
    }

    #[test]
    fn test_report_keeps_session_for_misses() {
        let no_package = Err(PanelError::NoPackage {
            function: "x".to_string(),
        });
        assert!(!report(no_package).unwrap());

        let network = Err(PanelError::Provider(HelpError::Network("reset".to_string())));
        assert!(!report(network).unwrap());

        let disposed = Err(PanelError::Provider(HelpError::Disposed));
        assert!(report(disposed).is_err());
    }
}
