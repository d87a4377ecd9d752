use clap::Parser;
use color_print::cprintln;

#[derive(Debug, clap::Parser)]
#[clap(author, version, about = "Assembler for the AC8 accumulator machine")]
struct Args {
    /// Input assembly file
    #[clap(default_value = "main.ac8.asm")]
    input: String,

    /// Output binary image
    #[clap(short, long, default_value = "main.ac8.bin")]
    output: String,

    /// Dump the memory image
    #[clap(short, long)]
    dump: bool,
}

fn main() {
    let args = Args::parse();

    let text = match std::fs::read_to_string(&args.input) {
        Ok(text) => text,
        Err(e) => {
            cprintln!("<red,bold>error</>: failed to read {}: {}", args.input, e);
            std::process::exit(1);
        }
    };

    let image = match ac8asm::assemble(&text) {
        Ok(image) => image,
        Err(e) => {
            cprintln!("<red,bold>error</>: {}", e);
            std::process::exit(1);
        }
    };

    if args.dump {
        for (row, chunk) in image.chunks(16).enumerate() {
            print!("{:02X}:", row * 16);
            for byte in chunk {
                print!(" {byte:02X}");
            }
            println!();
        }
    }

    if let Err(e) = std::fs::write(&args.output, &image) {
        cprintln!("<red,bold>error</>: failed to write {}: {}", args.output, e);
        std::process::exit(1);
    }
    println!("Assembled {} to {}", args.input, args.output);
}
