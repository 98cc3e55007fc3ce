//! Style roles for terminal output.
//!
//! Each logical role (an approval, a rejection, a status line, help headers)
//! maps to an optional `colored::Color`. Colour is applied only when the
//! caller passes `enabled = true`, so there is no global colour switch.
//!
//! ```
//! use scangate::core::styles::StyleRole;
//! assert_eq!(StyleRole::Approved.paint("ok", false), "ok");
//! assert!(StyleRole::Approved.paint("ok", true).starts_with("\x1b["));
//! ```

use clap::builder::styling::AnsiColor;
use colored::Color;

macro_rules! style {
    ( $( $variant:ident => $color:expr ),+ $(,)? ) => {
        #[derive(Copy, Clone, Debug, PartialEq, Eq)]
        pub enum StyleRole { $( $variant ),+ }

        impl StyleRole {
            pub fn color(self) -> Option<Color> {
                match self { $( StyleRole::$variant => $color ),+ }
            }
        }
    };
}

style! {
    Approved    => Some(Color::BrightGreen),
    Rejected    => Some(Color::Yellow),
    Failure     => Some(Color::BrightRed),
    Status      => Some(Color::Cyan),
    Header      => Some(Color::Yellow),
    Literal     => Some(Color::Cyan),
    Placeholder => Some(Color::Green),
}

impl StyleRole {
    /// Paint `text` in this role's colour when `enabled`
    pub fn paint(self, text: &str, enabled: bool) -> String {
        match (enabled, self.color()) {
            // explicit escapes, independent of colored's TTY detection
            (true, Some(color)) => format!("\x1b[{}m{}\x1b[0m", color.to_fg_str(), text),
            _ => text.to_string(),
        }
    }
}

fn color_to_ansi(c: Color) -> Option<AnsiColor> {
    use self::AnsiColor as A;
    use Color::*;
    Some(match c {
        Red => A::Red,
        Green => A::Green,
        Yellow => A::Yellow,
        Blue => A::Blue,
        Cyan => A::Cyan,
        BrightBlack => A::BrightBlack,
        BrightRed => A::BrightRed,
        BrightGreen => A::BrightGreen,
        BrightYellow => A::BrightYellow,
        _ => return None,
    })
}

/// clap help styles built from the same roles
pub fn palette_to_clap(enabled: bool) -> clap::builder::Styles {
    use clap::builder::styling::{Color as ClapColor, Style};
    if !enabled {
        return clap::builder::Styles::plain();
    }

    let style = |role: StyleRole, bold: bool| {
        let mut s = Style::new();
        if let Some(col) = role.color().and_then(color_to_ansi) {
            s = s.fg_color(Some(ClapColor::Ansi(col)));
        }
        if bold {
            s = s.bold();
        }
        s
    };

    clap::builder::Styles::styled()
        .header(style(StyleRole::Header, true))
        .usage(style(StyleRole::Header, true))
        .literal(style(StyleRole::Literal, false))
        .placeholder(style(StyleRole::Placeholder, false))
        .error(style(StyleRole::Failure, true))
        .invalid(style(StyleRole::Rejected, false))
        .valid(style(StyleRole::Approved, false))
}
