//! Terminal rendering helpers shared by the screens.

use pagination::{PageControl, PageEnvelope, PageRequest, page_controls};

use crate::domain::ports::Navigator;
use crate::domain::{ListController, ListPhase, Route};

/// Navigator that prints browser-style redirect hints.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn redirect(&self, route: Route) {
        println!("→ {route}");
    }
}

/// Screen heading.
pub fn title(text: &str) {
    println!("== {text} ==");
}

/// Success line for completed writes.
pub fn success(message: &str) {
    println!("✓ {message}");
}

/// Failure line; mirrors the toast the browser UI would show.
pub fn failure(error: &crate::domain::Error) {
    eprintln!("✗ {}", error.message());
}

/// Guard-redirect notice.
pub fn redirect_notice(from: Route, to: Route) {
    if to == Route::Login {
        println!("Sign in to open {from}. Run `ops360 login --email you@example.com`.");
    } else {
        println!("Your role cannot open {from}; landing on {to} instead.");
    }
}

/// Render a paginated list screen: rows, or the empty state, with the
/// range footer and page strip underneath.
pub fn list_screen<T>(
    heading: &str,
    label: &str,
    envelope: PageEnvelope<T>,
    mut row: impl FnMut(&T) -> String,
) {
    title(heading);

    let mut controller = ListController::new();
    let generation = controller.begin();
    let footer = footer_line(&envelope, label);
    controller.apply(generation, Ok(envelope.items));

    match controller.phase() {
        ListPhase::Loading => {}
        ListPhase::Empty => println!("No {label} found."),
        ListPhase::Error { message } => eprintln!("✗ {message}"),
        ListPhase::Ready { items } => {
            for item in items {
                println!("{}", row(item));
            }
            if let Some(footer) = footer {
                println!("{footer}");
            }
        }
    }
}

fn footer_line<T>(envelope: &PageEnvelope<T>, label: &str) -> Option<String> {
    if envelope.total == 0 || envelope.total_pages <= 1 {
        return None;
    }
    let range = PageRequest::new(envelope.page, envelope.limit)
        .ok()
        .and_then(|request| request.record_range(envelope.total));
    let mut line = match range {
        Some(range) => format!(
            "Showing {} to {} of {} {label}",
            range.start, range.end, envelope.total,
        ),
        None => format!("{} {label}", envelope.total),
    };
    line.push_str(" · pages ");
    line.push_str(&strip(envelope.page, envelope.total_pages));
    Some(line)
}

fn strip(page: u32, total_pages: u32) -> String {
    page_controls(page, total_pages)
        .into_iter()
        .map(|control| match control {
            PageControl::Page(number) if number == page => format!("[{number}]"),
            PageControl::Page(number) => number.to_string(),
            PageControl::Gap => "…".to_owned(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
