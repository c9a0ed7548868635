use pocket::memory_bus::MemoryBus;

const DIV: u16 = 0xFF04;
const TIMA: u16 = 0xFF05;
const TMA: u16 = 0xFF06;
const TAC: u16 = 0xFF07;
const IF: u16 = 0xFF0F;

fn make_bus() -> MemoryBus {
    let mut bus = MemoryBus::new();
    bus.load_rom(&vec![0u8; 0x8000]);
    bus
}

#[test]
fn div_increments_every_256_cycles() {
    let mut bus = make_bus();
    assert_eq!(bus.read_byte(DIV), 0x00);

    bus.step_timer(255);
    assert_eq!(bus.read_byte(DIV), 0x00);
    bus.step_timer(1);
    assert_eq!(bus.read_byte(DIV), 0x01);

    // Large deltas produce every increment
    bus.step_timer(256 * 4);
    assert_eq!(bus.read_byte(DIV), 0x05);
}

#[test]
fn div_write_resets_register_and_both_counters() {
    let mut bus = make_bus();
    bus.write_byte(TAC, 0x04); // enable, 4096 Hz => 1024-cycle period

    bus.step_timer(200);
    bus.write_byte(DIV, 0x37); // any value resets
    assert_eq!(bus.read_byte(DIV), 0x00);

    // The next TIMA increment lands exactly 1024 cycles after the reset,
    // not 824: the TIMA sub-counter was cleared too.
    bus.step_timer(1023);
    assert_eq!(bus.read_byte(TIMA), 0x00);
    bus.step_timer(1);
    assert_eq!(bus.read_byte(TIMA), 0x01);
}

#[test]
fn tima_rates_follow_tac() {
    // (TAC value, cycles per increment)
    for &(tac, period) in &[(0x04u8, 1024u32), (0x05, 16), (0x06, 64), (0x07, 256)] {
        let mut bus = make_bus();
        bus.write_byte(TAC, tac);
        bus.step_timer(period - 1);
        assert_eq!(bus.read_byte(TIMA), 0x00, "TAC {:02X}", tac);
        bus.step_timer(1);
        assert_eq!(bus.read_byte(TIMA), 0x01, "TAC {:02X}", tac);
        bus.step_timer(period * 3);
        assert_eq!(bus.read_byte(TIMA), 0x04, "TAC {:02X}", tac);
    }
}

#[test]
fn tima_disabled_when_tac_enable_clear() {
    let mut bus = make_bus();
    bus.write_byte(TAC, 0x01); // fastest rate selected but not enabled
    bus.step_timer(4096);
    assert_eq!(bus.read_byte(TIMA), 0x00);
}

#[test]
fn tima_overflow_reloads_tma_and_requests_interrupt() {
    let mut bus = make_bus();
    bus.write_byte(TMA, 0xAB);
    bus.write_byte(TIMA, 0xFF);
    bus.write_byte(TAC, 0x05); // enable, 262144 Hz => 16-cycle period

    bus.step_timer(16);

    assert_eq!(bus.read_byte(TIMA), 0xAB);
    assert_ne!(bus.read_byte(IF) & 0x04, 0);
}

#[test]
fn tima_overflows_once_per_wrap() {
    let mut bus = make_bus();
    bus.write_byte(TMA, 0x00);
    bus.write_byte(TAC, 0x05);

    // 256 increments in one delta: exactly one overflow
    bus.step_timer(16 * 256);
    assert_eq!(bus.read_byte(TIMA), 0x00);
    assert_ne!(bus.read_byte(IF) & 0x04, 0);

    bus.write_byte(IF, 0x00);
    bus.step_timer(16 * 8);
    assert_eq!(bus.read_byte(TIMA), 0x08);
    assert_eq!(bus.read_byte(IF) & 0x04, 0);
}

#[test]
fn dma_copies_oam_and_stalls_the_cpu_bus() {
    let mut bus = make_bus();
    for i in 0..0xA0u16 {
        bus.write_byte(0xC000 + i, (i as u8).wrapping_add(1));
    }
    bus.write_byte(0xFF80, 0x34);

    bus.write_byte(0xFF46, 0xC0);
    assert!(bus.dma_active());

    // The burst is atomic in emulated time: OAM already holds the data
    // (visible through the PPU's ungated port)
    for i in 0..0xA0u16 {
        assert_eq!(bus.raw_read(0xFE00 + i), (i as u8).wrapping_add(1));
    }

    // CPU-visible reads outside HRAM yield 0xFF for the stall window
    assert_eq!(bus.read_byte(0xC000), 0xFF);
    assert_eq!(bus.read_byte(0x0000), 0xFF);
    assert_eq!(bus.read_byte(0xFFFF), 0xFF); // IE sits outside 0xFF80-0xFFFE
    assert_eq!(bus.read_byte(0xFF80), 0x34); // HRAM stays visible

    bus.step_dma(639);
    assert!(bus.dma_active());
    assert_eq!(bus.read_byte(0xC000), 0xFF);

    bus.step_dma(1);
    assert!(!bus.dma_active());
    assert_eq!(bus.read_byte(0xC000), 0x01);
}

#[test]
fn dma_register_retains_last_written_page() {
    let mut bus = make_bus();
    bus.write_byte(0xFF46, 0xC1);
    bus.step_dma(640);
    assert_eq!(bus.read_byte(0xFF46), 0xC1);
}
