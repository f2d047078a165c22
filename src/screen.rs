// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Stores and displays the Chip-8's screen memory

use std::fmt::{Display, Formatter};

/// Width of the screen, in pixels
pub const WIDTH: usize = 64;
/// Height of the screen, in pixels
pub const HEIGHT: usize = 32;

/// A 64x32 monochrome display.
///
/// Each pixel is stored in its own byte cell, row-major (`y * 64 + x`).
/// A cell is `0` when off and `1` when on.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Screen {
    pixels: [u8; WIDTH * HEIGHT],
}

impl Screen {
    /// Constructs a blank screen
    pub fn new() -> Self {
        Screen {
            pixels: [0; WIDTH * HEIGHT],
        }
    }

    /// Turns every pixel off
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    /// Gets the pixel at (x, y), wrapping both coordinates onto the screen
    /// # Examples
    /// ```rust
    /// # use ch8r::*;
    /// let mut screen = Screen::new();
    /// screen.toggle(0, 0);
    /// assert!(screen.get(64, 32));
    /// ```
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.pixels[Self::index(x, y)] != 0
    }

    /// XORs the pixel at (x, y), wrapping both coordinates onto the screen.
    ///
    /// Returns true if the pixel was on beforehand (a collision).
    /// # Examples
    /// ```rust
    /// # use ch8r::*;
    /// let mut screen = Screen::new();
    /// assert!(!screen.toggle(3, 4));
    /// assert!(screen.get(3, 4));
    /// assert!(screen.toggle(3, 4));
    /// assert!(!screen.get(3, 4));
    /// ```
    pub fn toggle(&mut self, x: usize, y: usize) -> bool {
        let cell = &mut self.pixels[Self::index(x, y)];
        let was_on = *cell != 0;
        *cell = (!was_on).into();
        was_on
    }

    /// Gets the raw pixel cells, row-major
    pub fn as_slice(&self) -> &[u8] {
        &self.pixels
    }

    /// Counts the pixels which are on
    pub fn lit(&self) -> usize {
        self.pixels.iter().filter(|&&px| px != 0).count()
    }

    /// Prints the screen to stdout
    pub fn print_screen(&self) {
        print!("{self}");
    }

    #[inline(always)]
    fn index(x: usize, y: usize) -> usize {
        (y % HEIGHT) * WIDTH + (x % WIDTH)
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Screen {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Screen")
            .field("width", &WIDTH)
            .field("height", &HEIGHT)
            .field("lit", &self.lit())
            .finish()
    }
}

impl Display for Screen {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in self.pixels.chunks_exact(WIDTH) {
            writeln!(
                f,
                "|{}|",
                row.iter()
                    .map(|&px| if px != 0 { '█' } else { ' ' })
                    .collect::<String>()
            )?;
        }
        Ok(())
    }
}
