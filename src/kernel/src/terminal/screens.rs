//! Virtual screen snapshots and switching.
//!
//! Each virtual console is a full snapshot of the display grid plus the
//! cursor and attribute that were live when it was saved. Exactly one
//! screen is active (mirrored into the physical display) at a time; the
//! others are dormant copies.

use super::console::{DEFAULT_COLOR, PROMPT_LENGTH};
use super::{Console, Display};
use crate::arch::x86_64::vga::{ColorCode, ScreenChar, BUFFER_HEIGHT, BUFFER_WIDTH};

/// Number of virtual screens multiplexed onto the display.
pub const NUM_SCREENS: usize = 2;

/// One saved virtual console: grid, cursor and attribute.
#[derive(Clone, Copy)]
pub struct Screen {
    row: usize,
    col: usize,
    color: ColorCode,
    cells: [[ScreenChar; BUFFER_WIDTH]; BUFFER_HEIGHT],
}

impl Screen {
    const fn blank() -> Self {
        Screen {
            row: 0,
            col: 0,
            color: DEFAULT_COLOR,
            cells: [[ScreenChar::blank(DEFAULT_COLOR); BUFFER_WIDTH]; BUFFER_HEIGHT],
        }
    }
}

/// The set of virtual screens and the identity of the active one.
pub struct ScreenStore {
    screens: [Screen; NUM_SCREENS],
    active: usize,
}

impl ScreenStore {
    /// Creates the store with every screen initialized to the current
    /// display contents, screen 0 active.
    pub fn new<D: Display>(console: &Console<D>) -> Self {
        let mut store = ScreenStore {
            screens: [Screen::blank(); NUM_SCREENS],
            active: 0,
        };
        for id in 0..NUM_SCREENS {
            store.save(id, console);
        }
        store
    }

    /// Identity of the active screen (0-indexed).
    pub fn active(&self) -> usize {
        self.active
    }

    /// Identity of the next screen, wrapping.
    pub fn next_id(&self) -> usize {
        (self.active + 1) % NUM_SCREENS
    }

    /// Identity of the previous screen, wrapping.
    pub fn prev_id(&self) -> usize {
        if self.active == 0 {
            NUM_SCREENS - 1
        } else {
            self.active - 1
        }
    }

    /// Copies the live display, cursor and attribute into screen `id`.
    ///
    /// Out-of-range ids are ignored; the return value says whether the
    /// snapshot was taken.
    pub fn save<D: Display>(&mut self, id: usize, console: &Console<D>) -> bool {
        let Some(screen) = self.screens.get_mut(id) else {
            return false;
        };
        for row in 0..BUFFER_HEIGHT {
            for col in 0..BUFFER_WIDTH {
                screen.cells[row][col] = console.display().get(col, row);
            }
        }
        screen.row = console.row();
        screen.col = console.col();
        screen.color = console.color_code();
        true
    }

    /// Copies screen `id` into the live display, cursor and attribute.
    ///
    /// A restored column of 0 is normalized to the prompt column, so a
    /// screen never comes back with the cursor left of the prompt.
    /// Out-of-range ids are ignored.
    pub fn load<D: Display>(&self, id: usize, console: &mut Console<D>) -> bool {
        let Some(screen) = self.screens.get(id) else {
            return false;
        };
        for row in 0..BUFFER_HEIGHT {
            for col in 0..BUFFER_WIDTH {
                console.display_mut().put(col, row, screen.cells[row][col]);
            }
        }
        console.set_color_code(screen.color);
        let col = if screen.col == 0 { PROMPT_LENGTH } else { screen.col };
        console.set_position(screen.row, col);
        true
    }

    /// Switches the display to screen `id`: save the active screen, make
    /// `id` active, load it, redraw the screen indicator.
    ///
    /// Switching to the already-active screen or to an out-of-range id is
    /// a no-op and returns `false`. The whole sequence runs without
    /// preemption, so no partial state is ever visible.
    pub fn switch_to<D: Display>(&mut self, id: usize, console: &mut Console<D>) -> bool {
        if id >= NUM_SCREENS || id == self.active {
            return false;
        }
        self.save(self.active, console);
        self.active = id;
        self.load(id, console);
        console.draw_indicator(self.active, NUM_SCREENS);
        true
    }
}
