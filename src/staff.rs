//! Plain-text staff drawing for terminal play.
//!
//! Draws the five staff lines, the clef's reference line letter, ledger lines
//! out to the note, and the note head with its accidental.

use crate::catalog::{Clef, StaffPosition};
use crate::generator::{Accidental, Note};

const WIDTH: usize = 26;
const NOTE_COLUMN: usize = 13;

/// Lowest and highest rows always drawn
const LOW_ROW: i8 = -2;
const HIGH_ROW: i8 = 12;

fn clef_row(clef: Clef) -> i8 {
    match clef {
        // The G clef curls around the G4 line, the F clef's dots straddle F3
        Clef::Treble => 4,
        Clef::Bass => 8,
    }
}

fn clef_letter(clef: Clef) -> char {
    match clef {
        Clef::Treble => 'G',
        Clef::Bass => 'F',
    }
}

fn needs_ledger(row: i8, note: StaffPosition) -> bool {
    if row.rem_euclid(2) != 0 {
        return false;
    }
    (row < StaffPosition::BOTTOM_LINE.0 && row >= note.0)
        || (row > StaffPosition::TOP_LINE.0 && row <= note.0)
}

/// Render a staff with an optional note.
///
/// With `hint` set the note head is drawn as `@` and the pitch is spelled
/// out underneath.
pub fn render_staff(clef: Clef, note: Option<&Note>, hint: bool) -> String {
    let mut out = String::new();

    let low = note.map_or(LOW_ROW, |n| n.staff_position.0.min(LOW_ROW));
    let high = note.map_or(HIGH_ROW, |n| n.staff_position.0.max(HIGH_ROW));

    for row in (low..=high).rev() {
        let position = StaffPosition(row);
        let on_staff = position.is_on_line()
            && position >= StaffPosition::BOTTOM_LINE
            && position <= StaffPosition::TOP_LINE;

        let mut cells = vec![if on_staff { '-' } else { ' ' }; WIDTH];

        if row == clef_row(clef) {
            cells[1] = clef_letter(clef);
        }

        if let Some(note) = note {
            if needs_ledger(row, note.staff_position) {
                for cell in &mut cells[NOTE_COLUMN - 2..=NOTE_COLUMN + 2] {
                    *cell = '-';
                }
            }
            if row == note.staff_position.0 {
                cells[NOTE_COLUMN] = if hint { '@' } else { 'O' };
                match note.accidental {
                    Some(Accidental::Sharp) => cells[NOTE_COLUMN - 1] = '#',
                    Some(Accidental::Flat) => cells[NOTE_COLUMN - 1] = 'b',
                    None => {}
                }
            }
        }

        let line: String = cells.into_iter().collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }

    if let (true, Some(note)) = (hint, note) {
        out.push_str(&format!("Hint: This note is {}\n", note.pitch));
    }

    out
}
