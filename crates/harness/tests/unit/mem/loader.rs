//! Backdoor loader tests.

use std::io::Write;

use rvtb_core::mem::{BackdoorMemory, load_bin, load_bytes};

/// Growable word array standing in for the design's RAM.
#[derive(Debug, Default)]
struct VecRam {
    words: Vec<u32>,
}

impl BackdoorMemory for VecRam {
    fn poke_word(&mut self, index: usize, value: u32) {
        if index >= self.words.len() {
            self.words.resize(index + 1, 0);
        }
        self.words[index] = value;
    }
}

#[test]
fn packs_little_endian_words() {
    let mut ram = VecRam::default();
    let loaded = load_bytes(&[0x78, 0x56, 0x34, 0x12, 0xEF, 0xCD, 0xAB, 0x89], &mut ram);
    assert_eq!(loaded, 8);
    assert_eq!(ram.words, vec![0x1234_5678, 0x89AB_CDEF]);
}

#[test]
fn zero_pads_a_short_tail() {
    let mut ram = VecRam::default();
    let loaded = load_bytes(&[0x11, 0x22, 0x33, 0x44, 0xAA], &mut ram);
    assert_eq!(loaded, 5);
    assert_eq!(ram.words, vec![0x4433_2211, 0x0000_00AA]);
}

#[test]
fn empty_image_touches_nothing() {
    let mut ram = VecRam::default();
    assert_eq!(load_bytes(&[], &mut ram), 0);
    assert!(ram.words.is_empty());
}

#[test]
fn loads_an_image_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("boot.bin");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(&[0x13, 0x00, 0x00, 0x00, 0x6F, 0x00]).unwrap();
    drop(file);

    let mut ram = VecRam::default();
    let loaded = load_bin(&path, &mut ram).unwrap();
    assert_eq!(loaded, 6);
    // addi x0,x0,0 then a truncated jal, zero-padded.
    assert_eq!(ram.words, vec![0x0000_0013, 0x0000_006F]);
}

#[test]
fn missing_file_reports_the_io_error() {
    let mut ram = VecRam::default();
    assert!(load_bin("/nonexistent/boot.bin", &mut ram).is_err());
}
