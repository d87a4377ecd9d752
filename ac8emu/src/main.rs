use ac8emu::model::{Event, Machine};
use clap::Parser;
use color_print::cprintln;

#[derive(Debug, clap::Parser)]
#[clap(author, version, about = "Emulator for the AC8 accumulator machine")]
struct Args {
    /// Input binary image
    #[clap(default_value = "main.ac8.bin")]
    input: String,

    /// Maximum number of steps to execute (0 for unlimited)
    #[clap(short, long, default_value_t = 1000)]
    steps: u64,

    /// Print each executed instruction and the machine state
    #[clap(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let image = match std::fs::read(&args.input) {
        Ok(image) => image,
        Err(e) => {
            cprintln!("<red,bold>error</>: failed to read {}: {}", args.input, e);
            std::process::exit(1);
        }
    };

    let mut machine = Machine::new();
    if let Err(e) = machine.load_image(&image) {
        cprintln!("<red,bold>error</>: {}", e);
        std::process::exit(1);
    }
    println!("Loaded {} bytes from {}", image.len(), args.input);

    let steps = if args.verbose {
        let mut steps = 0;
        while !machine.halted && (args.steps == 0 || steps < args.steps) {
            match machine.step() {
                Event::Exec { at, inst } => println!("[{steps:>4}] 0x{at:02X}: {inst}"),
                Event::Unknown { at, byte } => {
                    cprintln!(
                        "<yellow,bold>warn</>: unknown opcode 0x{:02X} at 0x{:02X}, skipped",
                        byte,
                        at
                    );
                }
                Event::Halted => break,
            }
            print_state(&machine);
            steps += 1;
        }
        steps
    } else {
        machine.run(args.steps)
    };

    println!("Execution finished after {steps} steps.");
    if !machine.halted {
        cprintln!("<yellow,bold>warn</>: step budget spent before HLT");
    }
    print_state(&machine);
    dump(&machine, 0x80, 0x8F);
}

fn print_state(machine: &Machine) {
    println!(
        "AC: {:02X}  PC: {:02X}  N: {}  Z: {}",
        machine.acc, machine.pc, machine.n as u8, machine.z as u8
    );
}

fn dump(machine: &Machine, start: usize, end: usize) {
    println!("Memory dump [{start:02X}-{end:02X}]:");
    for (idx, addr) in (start..=end).enumerate() {
        if idx % 8 == 0 {
            print!("\n{addr:02X}: ");
        }
        print!("{:02X} ", machine.mem[addr]);
    }
    println!();
}
