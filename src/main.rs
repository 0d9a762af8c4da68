use std::io::{self, BufRead, Write};
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use argh::FromArgs;
use weathernow_core::{App, Config};
use weathernow_ui::{render, unit_from_config, Preferences, WeatherModel, WeatherServices};
use weathernow_weather::TemperatureUnit;

#[derive(FromArgs)]
/// Weather Now: current conditions for any city.
struct Args {
    /// city to search for on startup
    #[argh(positional)]
    query: Option<String>,

    /// look up weather for the device position on startup
    #[argh(switch, short = 'l')]
    locate: bool,

    /// temperature unit to display, C or F
    #[argh(option, short = 'u')]
    unit: Option<String>,

    /// path to the configuration file (default: platform config dir)
    #[argh(option, short = 'c')]
    config: Option<String>,
}

const HELP: &str = "\
Commands:
  search <city>   search for a city
  pick <n>        show weather for search result n
  recent <n>      show weather for recent search n
  locate          show weather for your location
  unit            switch between °C and °F
  clear           clear recent searches
  show            redraw the screen
  help            show this help
  quit            exit";

enum Flow {
    Continue,
    Quit,
}

fn parse_unit(value: &str) -> Result<TemperatureUnit> {
    match value.trim().to_ascii_uppercase().as_str() {
        "C" => Ok(TemperatureUnit::Celsius),
        "F" => Ok(TemperatureUnit::Fahrenheit),
        other => bail!("Unknown unit '{}', expected C or F", other),
    }
}

fn parse_index(arg: &str) -> Option<usize> {
    arg.trim().parse::<usize>().ok()?.checked_sub(1)
}

/// Block until pending requests finish, then redraw.
fn settle(model: &mut WeatherModel, wait: Duration) {
    if model.loading() {
        print!("{}", render(model));
        if !model.wait_until_idle(wait) {
            tracing::warn!("Request still pending after {:?}", wait);
        }
    } else {
        model.poll_channel();
    }
    print!("{}", render(model));
}

fn run_command(model: &mut WeatherModel, line: &str) -> Flow {
    let (command, arg) = match line.trim().split_once(char::is_whitespace) {
        Some((command, arg)) => (command, arg.trim()),
        None => (line.trim(), ""),
    };

    match command {
        "" => {}
        "search" | "s" => {
            model.set_query(arg);
            if !model.search(None) {
                println!("Type a city name after 'search'.");
            }
        }
        "pick" | "p" => {
            let picked = parse_index(arg).is_some_and(|i| model.select_candidate(i));
            if !picked {
                println!("No search result with that number.");
            }
        }
        "recent" | "r" => {
            let picked = parse_index(arg).is_some_and(|i| model.select_recent(i));
            if !picked {
                println!("No recent search with that number.");
            }
        }
        "locate" | "l" => model.use_my_location(),
        "unit" | "u" => model.toggle_unit(),
        "clear" => model.clear_recent(),
        "show" => {}
        "help" | "?" => println!("{}", HELP),
        "quit" | "exit" | "q" => return Flow::Quit,
        other => println!("Unknown command '{}'. Type 'help' for commands.", other),
    }

    Flow::Continue
}

fn request_wait(config: &Config) -> Duration {
    // locate can chain position, reverse lookup and forecast
    Duration::from_secs(config.location.timeout_secs + 2 * config.api.timeout_secs + 5)
}

fn main() -> Result<()> {
    let args: Args = argh::from_env();

    // Initialize core
    weathernow_core::init()?;

    let mut app = match &args.config {
        Some(path) => App::with_config(
            Config::load_from(Path::new(path))
                .with_context(|| format!("Failed to load config from '{}'", path))?,
        ),
        None => App::new()?,
    };
    app.initialize()?;

    let requested_unit = args.unit.as_deref().map(parse_unit).transpose()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("weathernow-net")
        .build()
        .context("Failed to start async runtime")?;

    let services = WeatherServices::from_config(app.config(), runtime.handle().clone())
        .context("Failed to create weather clients")?;
    let preferences = Preferences::new(app.preferences());
    let mut model = WeatherModel::new(
        services,
        preferences,
        unit_from_config(app.config().weather.default_unit),
    );

    if let Some(unit) = requested_unit {
        if model.unit() != unit {
            model.toggle_unit();
        }
    }

    tracing::info!("Weather Now started");
    let wait = request_wait(app.config());

    if args.locate {
        model.use_my_location();
    } else if let Some(query) = &args.query {
        model.set_query(query.as_str());
        model.search(None);
    }
    settle(&mut model, wait);
    println!("Type 'help' for commands.");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush().context("Failed to write prompt")?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read input")?;

        match run_command(&mut model, &line) {
            Flow::Quit => break,
            Flow::Continue => {
                let trimmed = line.trim();
                if !trimmed.is_empty() && !matches!(trimmed, "help" | "?") {
                    settle(&mut model, wait);
                }
            }
        }
    }

    // Graceful shutdown
    drop(model);
    runtime.shutdown_timeout(Duration::from_secs(1));
    app.shutdown()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_unit() {
        assert_eq!(parse_unit("c").unwrap(), TemperatureUnit::Celsius);
        assert_eq!(parse_unit(" F ").unwrap(), TemperatureUnit::Fahrenheit);
        assert!(parse_unit("K").is_err());
    }

    #[test]
    fn test_parse_index_is_one_based() {
        assert_eq!(parse_index("1"), Some(0));
        assert_eq!(parse_index(" 3 "), Some(2));
        assert_eq!(parse_index("0"), None);
        assert_eq!(parse_index("two"), None);
    }
}
