//! Builds nested `<ul>`/`<ol>` markup from a flat run of list paragraphs.
//!
//! Word stores lists flat: every list paragraph carries its own level and
//! kind, and nesting exists only implicitly. The builder reconstructs it
//! with recursive descent over levels:
//!
//! - an item at the frame's level becomes an `<li>`; a change of kind at the
//!   same level closes the open list tag and opens the other one,
//! - when the next item is deeper, the item's `<li>` stays open and a nested
//!   frame at the deeper level builds the sub-list,
//! - a shallower item closes the frame and hands its index back to the
//!   caller, which resumes from there.
//!
//! Example:
//!
//! ```text
//! (0, Bullet, A)        <ul>
//! (1, Number, B)          <li>A
//! (1, Number, C)            <ol>
//! (0, Bullet, D)              <li>B</li>
//!                             <li>C</li>
//!                           </ol>
//!                         </li>
//!                         <li>D</li>
//!                       </ul>
//! ```

use crate::ir::nodes::{ListItem, ListKind};
use log::debug;

const NESTED_INDENT: &str = "    ";

/// Render `items` as nested lists.
///
/// The outermost frame starts at the minimum level of the buffer, so a list
/// that begins indented does not get spurious wrappers. Items that a
/// malformed level jump leaves outside that frame are rendered as further
/// top-level lists rather than dropped.
pub fn build_list(items: &[ListItem]) -> String {
    let Some(base_level) = items.iter().map(|item| item.level).min() else {
        return String::new();
    };

    let mut fragments = Vec::new();
    let (html, mut next) = build_nested_list(items, 0, base_level);
    if !html.is_empty() {
        fragments.push(html);
    }

    while next < items.len() {
        let level = items[next].level;
        debug!("list item {next} at level {level} is outside the enclosing list; starting a new one");
        let (html, after) = build_nested_list(items, next, level);
        fragments.push(html);
        next = after;
    }

    fragments.join("\n")
}

/// Build one frame at `level`, starting at `start`.
///
/// Returns the frame's markup and the index of the first item it did not
/// consume.
pub fn build_nested_list(items: &[ListItem], start: usize, level: u32) -> (String, usize) {
    let mut parts: Vec<String> = Vec::new();
    let mut open_kind: Option<ListKind> = None;
    let mut index = start;

    while index < items.len() {
        let item = &items[index];

        if item.level < level {
            break;
        }
        if item.level > level {
            // Only reachable after a deeper frame returned to a shallower
            // item that still sits below this frame's level.
            break;
        }

        match open_kind {
            None => {
                parts.push(format!("<{}>", item.kind.tag()));
                open_kind = Some(item.kind);
            }
            Some(kind) if kind != item.kind => {
                parts.push(format!("</{}>", kind.tag()));
                parts.push(format!("<{}>", item.kind.tag()));
                open_kind = Some(item.kind);
            }
            Some(_) => {}
        }

        match items.get(index + 1) {
            Some(next) if next.level > item.level => {
                parts.push(format!("  <li>{}", item.text));
                let (nested, after) = build_nested_list(items, index + 1, next.level);
                parts.push(indent(&nested));
                parts.push("  </li>".to_string());
                index = after;
            }
            _ => {
                parts.push(format!("  <li>{}</li>", item.text));
                index += 1;
            }
        }
    }

    if let Some(kind) = open_kind {
        parts.push(format!("</{}>", kind.tag()));
    }

    (parts.join("\n"), index)
}

fn indent(html: &str) -> String {
    html.split('\n')
        .map(|line| format!("{NESTED_INDENT}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}
