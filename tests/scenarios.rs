// End-to-end scenarios straight out of spec.md §8 (S1, S2, S3, S5, S6) plus
// a PUTS run built the same way, driven through the public `Machine` API
// with an in-memory `TrapIo` standing in for the terminal.

use std::collections::VecDeque;

use lc3::devices::KeyboardSource;
use lc3::error::RunError;
use lc3::trap::TrapIo;
use lc3::Machine;

struct RecordingIo {
    input: VecDeque<u8>,
    output: Vec<u8>,
}

impl RecordingIo {
    fn new(input: &[u8]) -> Self {
        RecordingIo { input: input.iter().copied().collect(), output: Vec::new() }
    }

    fn output_str(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}

impl KeyboardSource for RecordingIo {
    fn input_ready(&mut self) -> bool {
        !self.input.is_empty()
    }
    fn read_byte(&mut self) -> u8 {
        self.input.pop_front().unwrap_or(0xFF)
    }
}

impl TrapIo for RecordingIo {
    fn write_byte(&mut self, byte: u8) {
        self.output.push(byte);
    }
    fn write_all(&mut self, bytes: &[u8]) {
        self.output.extend_from_slice(bytes);
    }
    fn flush(&mut self) {}
}

fn image_bytes(origin: u16, payload: &[u16]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(2 + payload.len() * 2);
    bytes.extend_from_slice(&origin.to_be_bytes());
    for word in payload {
        bytes.extend_from_slice(&word.to_be_bytes());
    }
    bytes
}

fn run_with_payload(payload: &[u16], input: &[u8]) -> (Machine, RecordingIo) {
    let mut machine = Machine::new();
    let bytes = image_bytes(0x3000, payload);
    let path = write_temp_image(&bytes);
    machine.load_image(&path).expect("well-formed in-memory image should load");
    let mut io = RecordingIo::new(input);
    let result = machine.run(&mut io);
    result.expect("scenario program should halt cleanly");
    (machine, io)
}

// Each call gets a fresh name via a counter on top of the pid so parallel
// tests in this file don't collide on the same temp file.
static COUNTER: std::sync::atomic::AtomicU32 = std::sync::atomic::AtomicU32::new(0);

fn write_temp_image(bytes: &[u8]) -> std::path::PathBuf {
    use std::io::Write;
    let n = COUNTER.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
    let mut path = std::env::temp_dir();
    path.push(format!("lc3-scenario-{}-{n}.obj", std::process::id()));
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(bytes).unwrap();
    path
}

#[test]
fn s1_halt() {
    let (_machine, io) = run_with_payload(&[0xF025], &[]);
    assert_eq!(io.output_str(), "Machine halted!\n");
}

#[test]
fn s2_add_immediate_zero_then_halt() {
    let (machine, _io) = run_with_payload(&[0x1260, 0xF025], &[]);
    assert_eq!(machine.registers().get(1), 0);
    assert_eq!(machine.registers().condition, lc3::registers::Condition::Zero);
}

#[test]
fn s3_output_a_then_halt() {
    // LD R0, [pc+2] ; TRAP OUT ; TRAP HALT ; .fill 'A'
    let (_machine, io) = run_with_payload(&[0x2002, 0xF021, 0xF025, 0x0041], &[]);
    assert_eq!(io.output_str(), "AMachine halted!\n");
}

#[test]
fn s5_invalid_opcode_is_reported() {
    let mut machine = Machine::new();
    let bytes = image_bytes(0x3000, &[0x8000]); // RTI
    let path = write_temp_image(&bytes);
    machine.load_image(&path).unwrap();
    let mut io = RecordingIo::new(&[]);
    let err = machine.run(&mut io).unwrap_err();
    assert!(matches!(err, RunError::InvalidOpcode));
}

#[test]
fn s6_sign_extension_in_add() {
    // R0 starts at 1 via LD; ADD R0, R0, #-1 (imm5 = 0b11111); HALT.
    let (machine, _io) = run_with_payload(&[0x2002, 0x103F, 0xF025, 0x0001], &[]);
    assert_eq!(machine.registers().get(0), 0);
    assert_eq!(machine.registers().condition, lc3::registers::Condition::Zero);
}

#[test]
fn puts_scenario_writes_string_then_halts() {
    // LD R0, [pc+2] -> loads a pointer to the string; TRAP PUTS; TRAP HALT;
    // .fill ptr (0x3004); "HI\0" starting at 0x3004.
    let payload = [0x2002u16, 0xF022, 0xF025, 0x3004, 0x0048, 0x0049, 0x0000];
    let (_machine, io) = run_with_payload(&payload, &[]);
    assert_eq!(io.output_str(), "HIMachine halted!\n");
}

#[test]
fn getc_blocks_for_exactly_one_byte_then_halts() {
    // TRAP GETC ; TRAP OUT ; TRAP HALT
    let (machine, io) = run_with_payload(&[0xF020, 0xF021, 0xF025], &[b'Z']);
    assert_eq!(machine.registers().get(0), b'Z' as u16);
    assert_eq!(io.output_str(), "ZMachine halted!\n");
}

#[test]
fn loading_two_images_lets_the_second_overwrite_overlap() {
    let mut machine = Machine::new();
    let first = image_bytes(0x3000, &[0x1111]);
    let second = image_bytes(0x3000, &[0xF025]); // HALT, overwrites the data word
    machine.load_image(&write_temp_image(&first)).unwrap();
    machine.load_image(&write_temp_image(&second)).unwrap();
    let mut io = RecordingIo::new(&[]);
    machine.run(&mut io).unwrap();
    assert_eq!(io.output_str(), "Machine halted!\n");
}

#[test]
fn missing_image_file_is_a_load_error_not_a_panic() {
    let mut machine = Machine::new();
    let err = machine.load_image(std::path::Path::new("/nonexistent/path/for/lc3/tests.obj"));
    assert!(err.is_err());
}
