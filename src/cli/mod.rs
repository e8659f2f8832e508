use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "terminal-staffing-api")]
#[command(about = "Terminal staffing management API server")]
#[command(version)]
pub struct Cli {
    #[arg(long, env = "BIND_ADDRESS", default_value = "0.0.0.0", help = "Address to listen on")]
    pub bind: String,

    #[arg(long, env = "PORT", default_value_t = 3000, help = "Port to listen on")]
    pub port: u16,
}

impl Cli {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}
