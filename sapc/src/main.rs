use color_print::cprintln;

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Input syntax tree (YAML)
    #[clap(default_value = "main.sap.yml")]
    input: String,

    /// Output listing file (stdout if not set)
    #[clap(short, long)]
    output: Option<String>,

    /// Dump compiled code with instruction words
    #[clap(short, long)]
    dump: bool,
}

fn main() {
    use clap::Parser;

    let args = Args::parse();
    if let Err(err) = run(&args) {
        cprintln!("<red,bold>error</>: {}", err);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), sapc::Error> {
    let source = std::fs::read_to_string(&args.input)?;
    let module = sapc::parse_tree(&source)?;
    let program = sapc::compile(&module)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, program.listing() + "\n")?;
            println!("{} > {}", args.input, path);
        }
        None => println!("{}", program.listing()),
    }
    if args.dump {
        print!("{}", program.dump());
    }
    Ok(())
}
