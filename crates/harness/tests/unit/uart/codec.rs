//! Bit-level codec tests: roundtrips across the configuration space,
//! injected faults, and the exact wire waveform.

use pretty_assertions::assert_eq;
use rstest::rstest;

use rvtb_core::TbError;
use rvtb_core::sim::{Scheduler, Signal};
use rvtb_core::uart::{
    FaultInjection, ParityMode, SerialFrame, StopMode, UartLine, WordLength,
};

use crate::common::harness::init_tracing;

const MSG: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit.";

/// One serial wire with a transceiver on each end: `writer` drives it,
/// `reader` samples it.
fn line_pair(sim: &Scheduler, frame: SerialFrame) -> (UartLine, UartLine, Signal) {
    let wire = sim.signal_init("serial", 1, 1);
    let nc_tx = sim.signal_init("nc_tx", 1, 1);
    let nc_rx = sim.signal_init("nc_rx", 1, 1);
    let writer = UartLine::new(sim, frame, nc_tx, wire.clone());
    let reader = UartLine::new(sim, frame, wire.clone(), nc_rx);
    (writer, reader, wire)
}

// ══════════════════════════════════════════════════════════
// 1. Roundtrips across the configuration space
// ══════════════════════════════════════════════════════════

/// Every word length against every parity mode; received text must equal
/// the message masked to the configured width.
#[rstest]
fn roundtrip_word_length_and_parity(
    #[values(WordLength::Five, WordLength::Six, WordLength::Seven, WordLength::Eight)]
    word_len: WordLength,
    #[values(
        ParityMode::None,
        ParityMode::Odd,
        ParityMode::Even,
        ParityMode::Force1,
        ParityMode::Force0
    )]
    parity: ParityMode,
) {
    init_tracing();
    let sim = Scheduler::new();
    let frame = SerialFrame {
        word_len,
        parity,
        ..SerialFrame::default()
    };
    let (writer, reader, _wire) = line_pair(&sim, frame);

    let _tx = sim.spawn(async move { writer.write_str(MSG).await });
    let received = sim.run(async move { reader.read_str(MSG.len()).await.unwrap() });

    assert_eq!(received, word_len.cast_str(MSG));
}

#[rstest]
#[case(38_400)]
#[case(9_600)]
fn roundtrip_at_slower_baud(#[case] baud_rate: u32) {
    init_tracing();
    let sim = Scheduler::new();
    let frame = SerialFrame {
        baud_rate,
        ..SerialFrame::default()
    };
    let (writer, reader, _wire) = line_pair(&sim, frame);

    let _tx = sim.spawn(async move { writer.write_str("sync").await });
    let received = sim.run(async move { reader.read_str(4).await.unwrap() });
    assert_eq!(received, "sync");
}

#[test]
fn roundtrip_with_two_stop_bits() {
    init_tracing();
    let sim = Scheduler::new();
    let frame = SerialFrame {
        stop: StopMode::Double,
        parity: ParityMode::Odd,
        ..SerialFrame::default()
    };
    let (writer, reader, _wire) = line_pair(&sim, frame);

    let _tx = sim.spawn(async move { writer.write_str("ab").await });
    let received = sim.run(async move { reader.read_str(2).await.unwrap() });
    assert_eq!(received, "ab");
}

// ══════════════════════════════════════════════════════════
// 2. Fault injection
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(ParityMode::Odd)]
#[case(ParityMode::Even)]
#[case(ParityMode::Force1)]
#[case(ParityMode::Force0)]
fn flipped_parity_is_a_parity_violation(#[case] parity: ParityMode) {
    init_tracing();
    let sim = Scheduler::new();
    let frame = SerialFrame {
        parity,
        ..SerialFrame::default()
    };
    let (writer, reader, _wire) = line_pair(&sim, frame);

    let _tx = sim.spawn(async move {
        writer
            .write_with(
                0x5A,
                FaultInjection {
                    flip_parity: true,
                    flip_stop: false,
                },
            )
            .await;
    });
    let result = sim.run(async move { reader.read().await });

    match result {
        Err(TbError::ParityViolation { expected, observed }) => {
            assert_eq!(observed, expected ^ 1);
        }
        other => panic!("expected a parity violation, got {other:?}"),
    }
}

#[test]
fn flipped_stop_is_a_framing_violation() {
    init_tracing();
    let sim = Scheduler::new();
    let (writer, reader, _wire) = line_pair(&sim, SerialFrame::default());

    let _tx = sim.spawn(async move {
        writer
            .write_with(
                0x5A,
                FaultInjection {
                    flip_parity: false,
                    flip_stop: true,
                },
            )
            .await;
    });
    let result = sim.run(async move { reader.read().await });

    match result {
        Err(TbError::FramingViolation {
            bit,
            expected,
            observed,
        }) => {
            assert_eq!(bit, "stop");
            assert_eq!(expected, 1);
            assert_eq!(observed, 0);
        }
        other => panic!("expected a framing violation, got {other:?}"),
    }
}

// ══════════════════════════════════════════════════════════
// 3. Exact wire waveform
// ══════════════════════════════════════════════════════════

/// Sample the wire at every bit center while transmitting 0xA3 with even
/// parity: start, eight data bits LSB-first, parity, stop.
#[test]
fn transmit_waveform_is_bit_exact() {
    init_tracing();
    let sim = Scheduler::new();
    let frame = SerialFrame {
        parity: ParityMode::Even,
        ..SerialFrame::default()
    };
    let (writer, _reader, wire) = line_pair(&sim, frame);
    let period = frame.bit_period();

    let _tx = sim.spawn(async move { writer.write(0xA3).await });

    let sampler = sim.clone();
    let levels = sim.run(async move {
        let mut levels = Vec::new();
        wire.falling_edge().await;
        sampler.delay(period.half()).await;
        levels.push(wire.get() & 1);
        for _ in 0..10 {
            sampler.delay(period).await;
            levels.push(wire.get() & 1);
        }
        levels
    });

    // 0xA3 = 0b1010_0011, LSB first; popcount is even, so parity = 0.
    assert_eq!(levels, vec![0, 1, 1, 0, 0, 0, 1, 0, 1, 0, 1]);
}
