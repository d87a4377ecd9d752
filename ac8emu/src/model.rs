use crate::Error;
use arch::inst::Inst;
use arch::mem::MEMORY_SIZE;
use arch::op::Op;
use color_print::cprintln;

/// Outcome of one fetch-decode-execute step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A decoded instruction executed at `at`.
    Exec { at: u8, inst: Inst },
    /// No operation at this high nibble; PC skipped one byte.
    Unknown { at: u8, byte: u8 },
    /// The machine is already halted; nothing happened.
    Halted,
}

/// Machine state: single 8-bit accumulator, program counter into the flat
/// memory, and the N/Z flags. Code and data share the one address space.
pub struct Machine {
    pub mem: [u8; MEMORY_SIZE],
    pub acc: u8,
    pub pc: u8,
    pub n: bool,
    pub z: bool,
    pub halted: bool,
}

impl Machine {
    pub fn new() -> Self {
        Machine {
            mem: [0; MEMORY_SIZE],
            acc: 0,
            pc: 0,
            n: false,
            z: false,
            halted: false,
        }
    }

    /// Load a binary image verbatim starting at byte 0.
    pub fn load_image(&mut self, image: &[u8]) -> Result<(), Error> {
        if image.len() > MEMORY_SIZE {
            return Err(Error::ImageTooLarge(image.len(), MEMORY_SIZE));
        }
        self.mem[..image.len()].copy_from_slice(image);
        Ok(())
    }

    /// Flags follow the accumulator after load/add/or/and/not only; store,
    /// jumps and halt leave them untouched.
    fn update_flags(&mut self) {
        self.n = self.acc & 0x80 != 0;
        self.z = self.acc == 0;
    }

    fn operand(&self) -> u8 {
        self.mem[self.pc.wrapping_add(1) as usize]
    }

    /// Execute one instruction. An unknown opcode advances the PC one byte
    /// and reports the anomaly; execution continues best-effort.
    pub fn step(&mut self) -> Event {
        if self.halted {
            return Event::Halted;
        }
        let at = self.pc;
        let byte = self.mem[at as usize];
        let Some(op) = Op::decode(byte) else {
            self.pc = self.pc.wrapping_add(1);
            return Event::Unknown { at, byte };
        };

        let operand = op.has_operand().then(|| self.operand());
        let addr = operand.unwrap_or(0) as usize;
        match op {
            Op::NOP => self.pc = self.pc.wrapping_add(1),
            Op::STA => {
                self.mem[addr] = self.acc;
                self.pc = self.pc.wrapping_add(2);
            }
            Op::LDA => {
                self.acc = self.mem[addr];
                self.update_flags();
                self.pc = self.pc.wrapping_add(2);
            }
            Op::ADD => {
                self.acc = self.acc.wrapping_add(self.mem[addr]);
                self.update_flags();
                self.pc = self.pc.wrapping_add(2);
            }
            Op::OR => {
                self.acc |= self.mem[addr];
                self.update_flags();
                self.pc = self.pc.wrapping_add(2);
            }
            Op::AND => {
                self.acc &= self.mem[addr];
                self.update_flags();
                self.pc = self.pc.wrapping_add(2);
            }
            Op::NOT => {
                self.acc = !self.acc;
                self.update_flags();
                self.pc = self.pc.wrapping_add(1);
            }
            Op::JMP => self.pc = addr as u8,
            Op::JN => {
                if self.n {
                    self.pc = addr as u8;
                } else {
                    self.pc = self.pc.wrapping_add(2);
                }
            }
            Op::JZ => {
                if self.z {
                    self.pc = addr as u8;
                } else {
                    self.pc = self.pc.wrapping_add(2);
                }
            }
            Op::HLT => self.halted = true,
        }
        Event::Exec {
            at,
            inst: Inst::new(op, operand),
        }
    }

    /// Run until halt or until the step budget is spent (0 = unlimited).
    /// Returns the number of steps executed. This counter is the only
    /// cancellation mechanism the machine has.
    pub fn run(&mut self, max_steps: u64) -> u64 {
        let mut steps = 0;
        while !self.halted && (max_steps == 0 || steps < max_steps) {
            if let Event::Unknown { at, byte } = self.step() {
                cprintln!(
                    "<yellow,bold>warn</>: unknown opcode 0x{:02X} at 0x{:02X}, skipped",
                    byte,
                    at
                );
            }
            steps += 1;
        }
        steps
    }
}

impl Default for Machine {
    fn default() -> Self {
        Machine::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine_with(image: &[u8]) -> Machine {
        let mut machine = Machine::new();
        machine.load_image(image).unwrap();
        machine
    }

    #[test]
    fn add_wraps_and_sets_flags() {
        // LDA 0x80; ADD 0x81; HLT with 200 + 100 = 44 (mod 256)
        let mut image = vec![0x20, 0x80, 0x30, 0x81, 0xF0];
        image.resize(0x82, 0);
        image[0x80] = 200;
        image[0x81] = 100;
        let mut machine = machine_with(&image);
        machine.run(10);
        assert!(machine.halted);
        assert_eq!(machine.acc, 44);
        assert!(!machine.n);
        assert!(!machine.z);
    }

    #[test]
    fn store_leaves_flags_alone() {
        // LDA 0x80 (0x00, sets Z); STA 0x81; HLT
        let mut image = vec![0x20, 0x80, 0x10, 0x81, 0xF0];
        image.resize(0x82, 0);
        let mut machine = machine_with(&image);
        machine.run(10);
        assert!(machine.z);
        assert_eq!(machine.mem[0x81], 0);
    }

    #[test]
    fn not_is_one_byte_and_flips_flags() {
        // NOT; HLT: accumulator starts 0, becomes 0xFF
        let mut machine = machine_with(&[0x60, 0xF0]);
        machine.run(10);
        assert!(machine.halted);
        assert_eq!(machine.acc, 0xFF);
        assert!(machine.n);
        assert!(!machine.z);
    }

    #[test]
    fn branches_follow_flags() {
        // LDA 0x80 (zero) ; JZ 0x06 ; NOT ; HLT at 0x06
        let mut image = vec![0x20, 0x80, 0xA0, 0x06, 0x60, 0x00, 0xF0];
        image.resize(0x81, 0);
        let mut machine = machine_with(&image);
        machine.run(10);
        assert!(machine.halted);
        // The NOT at 0x04 was jumped over.
        assert_eq!(machine.acc, 0);
    }

    #[test]
    fn unknown_opcode_is_skipped() {
        // 0x70 is unassigned; the machine logs and keeps going.
        let mut machine = machine_with(&[0x70, 0xF0]);
        let event = machine.step();
        assert_eq!(event, Event::Unknown { at: 0, byte: 0x70 });
        machine.run(10);
        assert!(machine.halted);
    }

    #[test]
    fn step_budget_caps_runaway_programs() {
        // JMP 0x00 spins forever.
        let mut machine = machine_with(&[0x80, 0x00]);
        let steps = machine.run(1000);
        assert_eq!(steps, 1000);
        assert!(!machine.halted);
    }

    #[test]
    fn halted_machine_stays_halted() {
        let mut machine = machine_with(&[0xF0]);
        machine.run(10);
        assert!(machine.halted);
        assert_eq!(machine.step(), Event::Halted);
    }
}
