//! Testing ch8r's public API, by running small hand-assembled programs

use ch8r::prelude::*;
use ch8r::Error;

fn setup_environment(program: &[u8]) -> Machine {
    let mut machine = Machine::new(Flags {
        seed: Some(8),
        ..Default::default()
    });
    machine
        .load_program(program)
        .expect("Test programs fit in program memory");
    machine
}

/// Steps the machine n times, failing the test on any error
fn run(machine: &mut Machine, n: usize) {
    for _ in 0..n {
        machine.step().expect("Program should run cleanly");
    }
}

mod load {
    use super::*;

    #[test]
    fn round_trip() {
        let mut machine = Machine::default();
        for len in [0, 1, 2, 0x100, 0xdff, 0xe00] {
            let program: Vec<u8> = (0..len).map(|b| (b * 7 + 3) as u8).collect();
            machine.load_program(&program).unwrap();
            assert_eq!(&machine.memory()[0x200..0x200 + len], program.as_slice());
            assert_eq!(
                &machine.memory()[Charset.range()],
                &ch8r::machine::mem::FONT
            );
        }
    }

    #[test]
    fn too_large() {
        let mut machine = setup_environment(&[0x12, 0x00]);
        run(&mut machine, 3);
        let err = machine.load_program(&[0xff; 0x1000]).unwrap_err();
        assert!(matches!(
            err,
            Error::ProgramTooLarge {
                len: 0x1000,
                max: 0xe00
            }
        ));
        assert_eq!(machine.memory(), Machine::default().memory());
        assert_eq!(0x200, machine.pc());
        assert_eq!(0, machine.cycle());
    }

    #[test]
    fn reload_clears_previous_program() {
        let mut machine = setup_environment(&[0xaa; 0x40]);
        machine.load_program(&[0x55; 0x10]).unwrap();
        assert!(machine.memory()[0x210..].iter().all(|&b| b == 0));
    }
}

/// v0 = 10, v1 = 11, v0 += v1: three steps leave pc just past the add
#[test]
fn add_program() {
    let mut machine = setup_environment(&[0x60, 0x0A, 0x61, 0x0B, 0x80, 0x14, 0x00, 0x00]);
    run(&mut machine, 3);
    assert_eq!(21, machine.v()[0]);
    assert_eq!(0, machine.v()[0xf]);
    assert_eq!(0x206, machine.pc());
    assert_eq!(3, machine.cycle());
    // The padding word after it isn't an instruction
    let err = machine.step().unwrap_err();
    assert!(err.is_recoverable());
    assert_eq!(0x208, machine.pc());
}

/// Draws every font glyph across the screen, then clears it
#[test]
fn draw_font_then_clear() {
    #[rustfmt::skip]
    let program = [
        0x60, 0x00, // 200: v0 = 0        (glyph)
        0x61, 0x00, // 202: v1 = 0        (x)
        0x62, 0x00, // 204: v2 = 0        (y)
        0xf0, 0x29, // 206: I = font(v0)
        0xd1, 0x25, // 208: draw 5 at (v1, v2)
        0x70, 0x01, // 20a: v0 += 1
        0x71, 0x05, // 20c: v1 += 5
        0x30, 0x10, // 20e: if v0 == 16, skip
        0x12, 0x06, // 210: jmp 206
        0x12, 0x12, // 212: jmp 212
    ];
    let mut machine = setup_environment(&program);
    run(&mut machine, 3 + 16 * 6);
    assert_eq!(0x212, machine.pc());
    assert!(machine.redraw_pending());
    // glyphs are placed 5 apart; the last ones wrap around the right edge
    let lit = machine.screen().lit();
    assert!(lit > 0);
    assert_eq!(0, machine.v()[0xf] & !1);

    // I = glyph 0, draw it at (v0, v0), then clear
    machine.load_program(&[0xa0, 0x00, 0xd0, 0x05, 0x00, 0xe0]).unwrap();
    run(&mut machine, 2);
    assert_eq!(14, machine.screen().lit());
    machine.clear_redraw();
    run(&mut machine, 1);
    assert_eq!(0, machine.screen().lit());
    assert!(machine.screen().as_slice().iter().all(|&px| px == 0));
    assert!(machine.redraw_pending());
}

#[test]
fn redraw_flag() {
    // cls, v0 = 1, draw 0 at (v0, v0)
    let mut machine = setup_environment(&[0x00, 0xe0, 0x60, 0x01, 0xd0, 0x05]);
    // A fresh machine wants to be painted
    assert!(machine.redraw_pending());
    machine.clear_redraw();
    run(&mut machine, 1);
    assert!(machine.redraw_pending(), "cls requests a redraw");
    machine.clear_redraw();
    run(&mut machine, 1);
    assert!(!machine.redraw_pending(), "arithmetic doesn't");
    run(&mut machine, 1);
    assert!(machine.redraw_pending(), "draw requests a redraw");
}

#[test]
fn subroutine() {
    #[rustfmt::skip]
    let program = [
        0x22, 0x08, // 200: call 208
        0x22, 0x08, // 202: call 208
        0x12, 0x04, // 204: jmp 204
        0x00, 0x00, // 206:
        0x70, 0x01, // 208: v0 += 1
        0x00, 0xee, // 20a: ret
    ];
    let mut machine = setup_environment(&program);
    run(&mut machine, 2);
    assert_eq!(&[0x200], machine.stack());
    run(&mut machine, 5);
    assert_eq!(2, machine.v()[0]);
    assert_eq!(0x204, machine.pc());
    assert_eq!(0, machine.sp());
}

#[test]
fn recursion_overflows() {
    // 200: call 200
    let mut machine = setup_environment(&[0x22, 0x00]);
    run(&mut machine, 16);
    let err = machine.step().unwrap_err();
    assert!(matches!(err, Error::StackOverflow { addr: 0x200, .. }));
    assert!(!err.is_recoverable());
    assert_eq!(16, machine.sp());
    assert_eq!(0x200, machine.pc());
}

mod keys {
    use super::*;

    #[test]
    fn wait_for_key() {
        // 200: v3 = K, 202: jmp 202
        let mut machine = setup_environment(&[0xf3, 0x0a, 0x12, 0x02]);
        for _ in 0..5 {
            assert_eq!(Step::AwaitingKey, machine.step().unwrap());
            assert_eq!(0x200, machine.pc());
        }
        let mut keys = [false; 16];
        keys[0x2] = true;
        keys[0xc] = true;
        machine.set_keys(keys);
        machine.step().unwrap();
        assert_eq!(0xc, machine.v()[3]);
        assert_eq!(0x202, machine.pc());
    }

    #[test]
    fn skip_on_key() {
        // v0 = 5, skip if key v0, v1 = 1, v2 = 2
        let program = [0x60, 0x05, 0xe0, 0x9e, 0x61, 0x01, 0x62, 0x02];
        let mut machine = setup_environment(&program);
        machine.press(5).unwrap();
        run(&mut machine, 3);
        assert_eq!(&[0, 2], &machine.v()[1..3]);

        let mut machine = setup_environment(&program);
        run(&mut machine, 4);
        assert_eq!(&[1, 2], &machine.v()[1..3]);
    }

    #[test]
    fn press_release() {
        let mut machine = Machine::default();
        assert!(machine.press(0xf).unwrap());
        assert!(!machine.press(0xf).unwrap());
        assert!(machine.keys()[0xf]);
        assert!(machine.release(0xf).unwrap());
        assert!(!machine.release(0xf).unwrap());
        assert!(matches!(
            machine.press(0x10),
            Err(Error::InvalidKey { key: 0x10 })
        ));
        assert!(machine.release(0x10).is_err());
    }

    #[test]
    fn keymap() {
        let held: Vec<usize> = "x12Q?"
            .chars()
            .filter_map(identify_key)
            .collect();
        assert_eq!(vec![0x0, 0x1, 0x2, 0x4], held);
    }
}

mod timers {
    use super::*;

    #[test]
    fn count_down_per_step() {
        // v0 = 5, DT = v0, ST = v0, then spin
        let program = [0x60, 0x05, 0xf0, 0x15, 0xf0, 0x18, 0x12, 0x06];
        let mut machine = setup_environment(&program);
        run(&mut machine, 3);
        // DT was set on step 2, and ticked on steps 2 and 3
        assert_eq!(3, machine.delay());
        assert_eq!(4, machine.sound());
        run(&mut machine, 5);
        assert_eq!(0, machine.delay());
        assert_eq!(0, machine.sound());
    }

    #[test]
    fn manual() {
        let mut machine = setup_environment(&[0x60, 0x05, 0xf0, 0x15, 0x12, 0x04]);
        machine.flags.manual_timers = true;
        run(&mut machine, 10);
        assert_eq!(5, machine.delay());
        for expected in [4, 3, 2, 1, 0, 0] {
            machine.tick_timers();
            assert_eq!(expected, machine.delay());
        }
    }
}

#[test]
fn seeded_random_is_repeatable() {
    // v0 = rand & ff, v1 = rand & 0f
    let program = [0xc0, 0xff, 0xc1, 0x0f];
    let mut a = setup_environment(&program);
    let mut b = setup_environment(&program);
    run(&mut a, 2);
    run(&mut b, 2);
    assert_eq!(a.v(), b.v());
    assert_eq!(0, a.v()[1] & 0xf0);
}

#[test]
fn registers() {
    let mut machine = Machine::default();
    machine.set_v(0xf, 0x12).unwrap();
    assert_eq!(0x12, machine.v()[0xf]);
    assert!(matches!(
        machine.set_v(0x10, 0),
        Err(Error::InvalidRegister { reg: 0x10 })
    ));
}
