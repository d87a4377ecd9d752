use clap::Parser;
use color_print::cprintln;

#[derive(Debug, clap::Parser)]
#[clap(author, version, about = "Compiler for the AC8 accumulator machine")]
struct Args {
    /// Input source file
    #[clap(default_value = "main.ac8")]
    input: String,

    /// Output assembly file
    #[clap(short, long, default_value = "main.ac8.asm")]
    output: String,

    /// Dump instructions and symbols
    #[clap(short, long)]
    dump: bool,
}

fn main() {
    let args = Args::parse();

    let source = match std::fs::read_to_string(&args.input) {
        Ok(source) => source,
        Err(e) => {
            cprintln!("<red,bold>error</>: failed to read {}: {}", args.input, e);
            std::process::exit(1);
        }
    };

    let output = match ac8cc::compile(&source) {
        Ok(output) => output,
        Err(e) => {
            cprintln!("<red,bold>error</>: {}", e);
            std::process::exit(1);
        }
    };

    for e in &output.errors {
        cprintln!("<red,bold>error</>: {}", e);
    }
    if output.failed() {
        cprintln!("<red,bold>Compilation failed</>: {} error(s)", output.errors.len());
        std::process::exit(1);
    }

    if args.dump {
        println!("--- symbols ---");
        for sym in output.symbols.iter() {
            println!(
                "0x{:02X} {:<12} = 0x{:02X}{}",
                sym.addr,
                sym.name,
                sym.value,
                if sym.initialized { "" } else { " (uninitialized)" }
            );
        }
        println!("--- code ({} bytes) ---", output.program.code_size());
        for (idx, inst) in output.program.insts().iter().enumerate() {
            println!("0x{:02X}: {}", output.program.byte_offset(idx), inst);
        }
    }

    if let Err(e) = std::fs::write(&args.output, output.asm_text()) {
        cprintln!("<red,bold>error</>: failed to write {}: {}", args.output, e);
        std::process::exit(1);
    }
    println!("Compiled {} to {}", args.input, args.output);
}
