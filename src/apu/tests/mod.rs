use crate::apu::{AudioUnit, SilentAPU};

fn run_half_frames(apu: &mut SilentAPU, count: u16) {
    for _ in 0..count * 7457 {
        apu.tick();
    }
}

#[test]
fn test_status_reports_loaded_channels() {
    let mut apu = SilentAPU::new();
    assert_eq!(apu.read_status(), 0);

    /* enable pulse 1 and noise only */
    apu.write(0x4015, 0b1001);
    apu.write(0x4003, 0x08); /* length index 1: 254 */
    apu.write(0x4007, 0x08); /* pulse 2 disabled, ignored */
    apu.write(0x400f, 0x00); /* length index 0: 10 */
    assert_eq!(apu.read_status(), 0b1001);

    /* disabling a channel clears its counter */
    apu.write(0x4015, 0b0001);
    assert_eq!(apu.read_status(), 0b0001);
}

#[test]
fn test_length_counters_run_down() {
    let mut apu = SilentAPU::new();
    apu.write(0x4015, 0b0011);
    apu.write(0x4003, 0x18); /* index 3: 2 */
    apu.write(0x4004, 0x20); /* pulse 2 halted */
    apu.write(0x4007, 0x18);

    run_half_frames(&mut apu, 1);
    assert_eq!(apu.read_status(), 0b0011);
    run_half_frames(&mut apu, 1);
    assert_eq!(apu.read_status(), 0b0010);
}

#[test]
fn test_triangle_halt_bit() {
    let mut apu = SilentAPU::new();
    apu.write(0x4015, 0b0100);
    apu.write(0x4008, 0x80);
    apu.write(0x400b, 0x18);
    run_half_frames(&mut apu, 4);
    assert_eq!(apu.read_status(), 0b0100);

    apu.write(0x4008, 0x00);
    run_half_frames(&mut apu, 2);
    assert_eq!(apu.read_status(), 0);
}

#[test]
fn test_frame_counter_write_restarts_sequence() {
    let mut apu = SilentAPU::new();
    apu.write(0x4015, 0b0001);
    apu.write(0x4003, 0x18);
    for _ in 0..7456 {
        apu.tick();
    }
    apu.write(0x4017, 0x40);
    apu.tick();
    /* the half-frame clock was pushed back */
    assert_eq!(apu.read_status(), 0b0001);
    run_half_frames(&mut apu, 2);
    assert_eq!(apu.read_status(), 0);
}
