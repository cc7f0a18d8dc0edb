//! CLI output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use crate::access::{Layout, Navigation};
use crate::auth::Role;
use crate::session::Session;

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn warn(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

fn role_color(role: Role) -> Color {
    match role {
        Role::Administrator => Color::Magenta,
        Role::Guard => Color::Yellow,
        Role::Maintenance => Color::Blue,
        Role::Resident => Color::Green,
    }
}

/// Print the signed-in user as a two-column table
pub fn print_session_table(session: &Session) {
    let (Some(user), Some(role)) = (session.user(), session.role()) else {
        info("Not signed in. Run 'portal login --email <email>'");
        return;
    };

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Field").fg(Color::Cyan),
            Cell::new("Value").fg(Color::Cyan),
        ]);

    table.add_row(vec![Cell::new("Name"), Cell::new(user.full_name())]);
    table.add_row(vec![Cell::new("Email"), Cell::new(&user.email)]);
    table.add_row(vec![Cell::new("Phone"), Cell::new(&user.phone)]);
    table.add_row(vec![Cell::new("House"), Cell::new(&user.house_number)]);
    table.add_row(vec![
        Cell::new("Role"),
        Cell::new(&user.role).fg(role_color(role)),
    ]);
    table.add_row(vec![
        Cell::new("Member since"),
        Cell::new(user.created_at.format("%Y-%m-%d").to_string()),
    ]);
    table.add_row(vec![
        Cell::new("Remembered"),
        Cell::new(if session.remember_me() { "yes" } else { "no" }),
    ]);

    println!("{table}");
}

/// Print the outcome of a navigation
pub fn print_navigation(nav: &Navigation) {
    if nav.was_redirected() {
        let hops = nav
            .redirects
            .iter()
            .map(|r| r.yellow().to_string())
            .collect::<Vec<_>>()
            .join(" → ");
        println!("{} → {}", nav.requested, hops);
    } else {
        println!("{} {}", nav.path.green(), "(access granted)".dimmed());
    }

    let layout = match nav.layout {
        Layout::Guard => nav.layout.to_string().yellow(),
        Layout::Desktop => nav.layout.to_string().magenta(),
        _ => nav.layout.to_string().normal(),
    };
    println!("  layout: {}", layout);
}
