use clap::{App, AppSettings, Arg};
use tracing_subscriber::fmt::SubscriberBuilder;
use tracing_subscriber::EnvFilter;

mod subcommands;

fn file_arg() -> Arg<'static> {
    Arg::new("FILE")
        .help("graph in JSON format")
        .required(true)
        .index(1)
}

fn output_arg() -> Arg<'static> {
    Arg::new("output")
        .help("output file, STDOUT if omitted")
        .short('o')
        .long("output")
        .takes_value(true)
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    SubscriberBuilder::default()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let matches = App::new("rectflip")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Regular edge labelings, rectangular duals and their flips")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            App::new("check")
                .about("checks that a graph is properly triangulated")
                .arg(file_arg()),
        )
        .subcommand(
            App::new("dual")
                .about("computes the rectangular dual")
                .arg(file_arg())
                .arg(output_arg())
                .arg(
                    Arg::new("format")
                        .help("output format")
                        .short('f')
                        .long("format")
                        .takes_value(true)
                        .possible_values(["text", "tikz", "json"])
                        .default_value("text"),
                )
                .arg(Arg::new("bare").help("tikz without document preamble").long("bare"))
                .arg(Arg::new("no-labels").help("tikz without vertex labels").long("no-labels")),
        )
        .subcommand(
            App::new("flips")
                .about("lists the flip cycles of the regular edge labeling")
                .arg(file_arg()),
        )
        .subcommand(
            App::new("flip")
                .about("flips one cycle and writes the resulting graph")
                .arg(file_arg())
                .arg(
                    Arg::new("INDEX")
                        .help("position in the list printed by 'flips'")
                        .required(true)
                        .index(2),
                )
                .arg(output_arg()),
        )
        .subcommand(
            App::new("walk")
                .about("random walk along flips")
                .arg(file_arg())
                .arg(
                    Arg::new("steps")
                        .help("number of flips")
                        .short('n')
                        .long("steps")
                        .takes_value(true)
                        .required(true),
                )
                .arg(Arg::new("seed").help("seed of the random generator").long("seed").takes_value(true))
                .arg(output_arg()),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("check", m)) => subcommands::check(m),
        Some(("dual", m)) => subcommands::dual(m),
        Some(("flips", m)) => subcommands::flips(m),
        Some(("flip", m)) => subcommands::flip_cycle(m),
        Some(("walk", m)) => subcommands::walk(m),
        _ => {}
    }
}
