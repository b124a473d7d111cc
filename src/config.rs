use clap::Parser;

// CLI argument structure
#[derive(Parser, Debug, Clone)]
#[command(name = "living-books-gateway")]
#[command(about = "Throttling front door for the Living Books API")]
pub struct Args {
    // Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    // Port to run the server on
    #[arg(short, long, default_value_t = 8000)]
    pub port: u16,

    // Seconds between limiter sweeps, 0 disables the sweeper
    #[arg(long, default_value_t = 300)]
    pub sweep_interval: u64,
}

impl Args {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
