// src/main.rs

use env_logger::Env;
use log::{error, info};
use modmath::config::KernelConfig;
use modmath::factorization::factor_with_retries;
use modmath::primality::is_prime;

fn main() {
    let config = KernelConfig::load().unwrap_or_else(|err| {
        eprintln!("config error, falling back to defaults: {}", err);
        KernelConfig::default()
    });

    // Initialize the logger
    let env = Env::default()
        .filter_or("MODMATH_LOG_LEVEL", config.log_level.as_str())
        .write_style_or("MODMATH_LOG_STYLE", "auto");

    env_logger::Builder::from_env(env).init();

    let arguments: Vec<String> = std::env::args().skip(1).collect();
    if arguments.is_empty() {
        eprintln!("usage: modmath <n> [<n> ...]");
        std::process::exit(2);
    }

    let mut failed = false;
    for argument in &arguments {
        let n: u64 = match argument.parse() {
            Ok(n) => n,
            Err(_) => {
                error!("not a non-negative 64-bit integer: {}", argument);
                failed = true;
                continue;
            }
        };
        if is_prime(n) {
            info!("{} is prime", n);
            println!("{} = {}", n, n);
            continue;
        }
        match factor_with_retries(n, config.factorization.rho_retries) {
            Ok(factorization) => {
                info!("{} factored as {}", n, factorization);
                println!("{} = {}", n, factorization);
            }
            Err(err) => {
                error!("failed to factor {}: {}", n, err);
                failed = true;
            }
        }
    }
    if failed {
        std::process::exit(1);
    }
}
