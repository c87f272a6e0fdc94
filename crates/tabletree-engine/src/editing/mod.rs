/*!
 * # Structural table editing core
 *
 * Everything here operates on the path-addressed tree from
 * [`crate::models`] through one shared discipline: **a path is a query
 * result, not a handle**. Any structural mutation shifts the indices of
 * later siblings, so every operation re-derives the paths it needs via the
 * `find_*` lookups at the moment of use and never caches one across a
 * mutation. All work is synchronous; no lookup-then-mutate sequence spans
 * an await point or event-loop turn.
 *
 * ## Module structure
 *
 * - **`document`**: the in-memory host handle — tree roots, cursor,
 *   version counter, and the primitive transforms (path dereference,
 *   ancestor lookup, single-node insert/remove) everything else builds on.
 *   The primitives transform the stored selection through each edit.
 * - **`tables`**: the stateless table operation set — insert/remove table,
 *   row and column, ancestor queries, and cursor cell-to-cell movement.
 *   Operations are total: an unresolvable location is a silent no-op, and
 *   shrinking a table to zero rows or zero columns cascades to whole-table
 *   deletion so degenerate shapes never exist.
 * - **`keyboard`**: first-refusal key dispatcher mapping Tab/Shift+Tab and
 *   arrow keys onto the `tables` movement operations; returns whether the
 *   host must suppress its default handling.
 * - **`affordance`**: per-table ephemeral armed-for-deletion state driving
 *   gutter delete controls and their transient selection marks.
 *
 * ## Usage pattern
 *
 * ```rust
 * use tabletree_engine::editing::{tables, keyboard, Document, Key, KeyEvent, Location};
 *
 * let mut doc = Document::new();
 *
 * // Build a 2×2 table and land in its first cell.
 * tables::insert_table(&mut doc, 2, 2, &Location::Cursor);
 * assert!(keyboard::should_handle(&doc));
 *
 * // Tab walks the grid.
 * let handled = keyboard::handle_key_down(&mut doc, &KeyEvent::new(Key::Tab));
 * assert!(handled);
 *
 * // Grow the table; the cursor's cell keeps its position.
 * tables::insert_table_row(&mut doc, &Location::Cursor, Default::default());
 * ```
 */

pub mod affordance;
pub mod document;
pub mod keyboard;
pub mod tables;

// Public API re-exports
pub use affordance::{AffordanceState, ArmedTarget};
pub use document::{CursorPosition, Document, EditError};
pub use keyboard::{Key, KeyEvent, handle_key_down, should_handle};
pub use tables::{ColumnPosition, Location, RowPosition};
