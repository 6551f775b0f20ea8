use crate::conversation::EXHAUSTED_REPLY;
use crate::models::short_name;
use crate::utils::format::{FormattedMessage, LineKind, classify_line, format_message};
use console::{measure_text_width, style};

fn content_width() -> usize {
    let term = console::Term::stdout();
    let terminal_width = term.size().1 as usize;
    std::cmp::min(terminal_width.saturating_sub(4), 120).max(40)
}

fn looks_like_markdown(text: &str) -> bool {
    text.contains("```") || text.contains('*') || text.contains('`') || text.contains('#')
}

/// Greedy word wrap by display width; words longer than `width` get a line
/// of their own.
pub fn wrap_line(line: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in line.split_whitespace() {
        let needed = if current.is_empty() {
            measure_text_width(word)
        } else {
            measure_text_width(&current) + 1 + measure_text_width(word)
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

const ITEM_INDENT: &str = "  ";
const CONTINUATION_INDENT: &str = "     ";

/// Indents a numbered item and its wrapped continuation lines so that no
/// line exceeds `width` columns.
pub fn layout_list_item(line: &str, width: usize) -> Vec<String> {
    wrap_line(line, width.saturating_sub(CONTINUATION_INDENT.len()))
        .into_iter()
        .enumerate()
        .map(|(i, part)| {
            let indent = if i == 0 { ITEM_INDENT } else { CONTINUATION_INDENT };
            format!("{}{}", indent, part)
        })
        .collect()
}

/// Announce which model the fallback chain is trying now
pub fn display_model_selected(model: &str) {
    println!(
        "{} {} {}",
        style("⟳").dim().cyan(),
        style(format!("Using: {}", short_name(model))).bold().cyan(),
        style(format!("({})", model)).dim()
    );
}

/// Render an assistant reply, laying out numbered lists line by line
pub fn display_reply(content: &str) {
    let width = content_width();
    println!("\n{}", style("🤖 ASSISTANT").bold().blue());

    match format_message(content) {
        FormattedMessage::Lines(lines) => {
            for line in lines {
                match classify_line(line) {
                    LineKind::ListItem => {
                        for (i, part) in layout_list_item(line, width).iter().enumerate() {
                            if i == 0 {
                                println!("{}", style(part).bold().white());
                            } else {
                                println!("{}", style(part).white());
                            }
                        }
                    }
                    LineKind::Break => println!(),
                    LineKind::Paragraph => {
                        for part in wrap_line(line, width) {
                            println!("{}", part);
                        }
                    }
                }
            }
        }
        FormattedMessage::Text(text) if looks_like_markdown(text) => {
            termimad::print_text(text);
        }
        FormattedMessage::Text(text) => {
            for line in text.split('\n') {
                for part in wrap_line(line, width) {
                    println!("{}", part);
                }
            }
        }
    }
    println!();
}

/// Show the placeholder reply used when every model failed
pub fn display_exhausted() {
    println!(
        "\n{} {}\n",
        style("⚠️").bold().red(),
        style(EXHAUSTED_REPLY).bold().red()
    );
}

pub fn display_error(message: &str) {
    eprintln!("{} {}", style("Error:").bold().red(), message);
}
