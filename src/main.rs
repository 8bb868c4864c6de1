use std::time::Duration;

use ping_herd::{host_list, summary, Dispatcher, GenericError, ProbeRunner, SweepConfig};

#[derive(Debug)]
struct Error {
    pub message: String,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "Error")?;
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

#[derive(argh::FromArgs)]
/// ping-herd - send ICMP ECHO_REQUEST to every host of a host list
struct Args {
    #[argh(option, short = 'f', default = "String::from(\"hosts.csv\")")]
    /// comma-delimited host list, the first field of each line is the host
    file: String,

    #[argh(option, short = 'c', default = "10")]
    /// number of echo requests per host
    count: u16,

    #[argh(option, short = 'r', default = "10")]
    /// number of hosts probed at the same time
    routines: usize,

    #[argh(option, short = 'W', default = "3")]
    /// seconds to wait for each reply
    timeout: u64,

    #[argh(option, short = 'i', default = "1000")]
    /// milliseconds between echo requests to the same host
    interval: u64,

    #[argh(switch)]
    /// log progress to stderr
    verbose: bool,
}

impl Args {
    fn sweep_config(&self) -> Result<SweepConfig, Error> {
        if self.count == 0 || self.routines == 0 || self.timeout == 0 {
            return Err(Error { message: "count, routines and timeout must be greater than zero".to_owned() });
        }
        Ok(SweepConfig {
            packet_count: self.count,
            concurrency_limit: self.routines,
            timeout: Duration::from_secs(self.timeout),
            interval: Duration::from_millis(self.interval),
        })
    }
}

fn main() -> Result<(), GenericError> {
    let args: Args = argh::from_env();

    let level = if args.verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };
    let subscriber =
        tracing_subscriber::FmtSubscriber::builder().with_max_level(level).with_writer(std::io::stderr).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = args.sweep_config()?;
    let hosts = host_list::read_hosts(&args.file)?;
    tracing::debug!("probing {} hosts from {}", hosts.len(), args.file);

    let dispatcher = Dispatcher::new(&config, ProbeRunner::new(&config));
    let run = dispatcher.run_all(&hosts, |report| println!("{}", summary::format_report(report)))?;
    println!("{}", summary::format_run(&run));

    Ok(())
}
