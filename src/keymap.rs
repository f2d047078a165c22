// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Maps host keys onto the hex keypad
//!
//! ```text
//! 1 2 3 4      1 2 3 C
//! q w e r  =>  4 5 6 D
//! a s d f      7 8 9 E
//! z x c v      A 0 B F
//! ```

/// Gets the keypad key for a host key, if it has one
/// # Examples
/// ```rust
/// # use ch8r::keymap::identify_key;
/// assert_eq!(Some(0xc), identify_key('4'));
/// assert_eq!(Some(0x0), identify_key('X'));
/// assert_eq!(None, identify_key('p'));
/// ```
pub fn identify_key(key: char) -> Option<usize> {
    Some(match key.to_ascii_lowercase() {
        '1' => 0x1,
        '2' => 0x2,
        '3' => 0x3,
        '4' => 0xc,
        'q' => 0x4,
        'w' => 0x5,
        'e' => 0x6,
        'r' => 0xd,
        'a' => 0x7,
        's' => 0x8,
        'd' => 0x9,
        'f' => 0xe,
        'z' => 0xa,
        'x' => 0x0,
        'c' => 0xb,
        'v' => 0xf,
        _ => return None,
    })
}
