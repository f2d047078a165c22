//! Represents flags that aid in implementation but aren't a part of the Chip-8 machine

/// Represents flags that configure the [super::Machine], but aren't inherent to it
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Flags {
    /// Set when debug (live disassembly) mode enabled
    pub debug: bool,
    /// Set when the host ticks the timers itself, instead of once per step
    pub manual_timers: bool,
    /// Seeds the random number generator on every reset.
    /// When unset, the generator is seeded from entropy.
    pub seed: Option<u64>,
}

impl Flags {
    /// Toggles debug mode
    ///
    /// # Examples
    /// ```rust
    /// # use ch8r::*;
    /// let mut flags = Flags::default();
    /// assert_eq!(false, flags.debug);
    /// // Toggle debug mode
    /// flags.debug();
    /// assert_eq!(true, flags.debug);
    /// ```
    pub fn debug(&mut self) {
        self.debug = !self.debug
    }

    /// Sets the random seed
    /// # Examples
    /// ```rust
    /// # use ch8r::*;
    /// let flags = Flags::default().with_seed(0xc8);
    /// assert_eq!(Some(0xc8), flags.seed);
    /// ```
    pub fn with_seed(self, seed: u64) -> Self {
        Flags {
            seed: Some(seed),
            ..self
        }
    }
}
