use std::{env, fs, path::PathBuf};

use clap::ValueEnum;
use clap_complete::Shell;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let path_arg = |arg: clap::Arg| arg.value_parser(clap::value_parser!(std::path::PathBuf));

    let mut cmd = clap::Command::new("qute-reader")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Open the readable part of a page in a new qutebrowser tab")
        .arg(clap::arg!([INPUT] "URL to fetch, local HTML file, or '-' for stdin"))
        .arg(clap::arg!(--url <URL> "Page URL").env("QUTE_URL"))
        .arg(clap::arg!(--mode <MODE> "Invocation mode (hints, command)").env("QUTE_MODE"))
        .arg(path_arg(clap::arg!(--html <FILE> "Dumped page HTML (command mode)").env("QUTE_HTML")))
        .arg(path_arg(clap::arg!(--"data-dir" <DIR> "qutebrowser data directory").env("QUTE_DATA_DIR")))
        .arg(path_arg(clap::arg!(--"config-dir" <DIR> "qutebrowser config directory").env("QUTE_CONFIG_DIR")))
        .arg(path_arg(clap::arg!(--fifo <FIFO> "Command FIFO").env("QUTE_FIFO")))
        .arg(clap::arg!(--"user-agent" <UA> "User-Agent for HTTP requests").env("QUTE_USER_AGENT"))
        .arg(path_arg(clap::arg!(-o --output <FILE> "Output file")))
        .arg(clap::arg!(--"no-open" "Write the document without opening it"))
        .arg(clap::arg!(--json "Print the extracted article as JSON instead of rendering it"))
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("30"))
        .arg(
            clap::arg!(--"char-threshold" <NUM> "Minimum character threshold for content candidates")
                .default_value("500"),
        )
        .arg(clap::arg!(--"max-elements" <NUM> "Maximum number of elements to parse").default_value("0"))
        .arg(clap::arg!(-v --verbose "Enable debug logging"))
        .arg(
            clap::arg!(--completions <SHELL> "Generate shell completion script")
                .value_parser(clap::value_parser!(Shell)),
        );

    for shell in Shell::value_variants() {
        clap_complete::generate_to(*shell, &mut cmd, "qute-reader", &completions_dir).unwrap();
    }

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
