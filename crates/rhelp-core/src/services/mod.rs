//! Application services built on the ports.

mod help_panel;

pub use help_panel::{HelpPanel, NavButton, PanelError, PanelMessage};
