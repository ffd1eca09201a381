use std::error::Error;

use clap::Parser;
use log::*;

use model::{ButtonSpec, ToastOptions, TrustedMarkup};
use toast::{Dom, MemoryDom, ToastManager, VirtualScheduler};
use toast_config::read_config;

/// Render toasts into an in-memory document and print the markup as it
/// stands at a given point in (virtual) time.
#[derive(Parser, Debug)]
#[command(name = "toast-preview", version, about)]
struct Args {
    /// One toast per message
    #[arg(required = true)]
    messages: Vec<String>,

    /// Type classes, e.g. "success" or "error wide"
    #[arg(short = 't', long = "type")]
    kind: Option<String>,

    /// Auto-dismiss after this many ms instead of the configured default
    #[arg(short, long, conflicts_with = "sticky")]
    dismiss_after: Option<u32>,

    /// Never auto-dismiss
    #[arg(long)]
    sticky: bool,

    /// Leave out the close control
    #[arg(long)]
    no_close: bool,

    /// Action button as CLASS=MARKUP, may be repeated
    #[arg(short, long = "button", value_parser = parse_button)]
    buttons: Vec<(String, String)>,

    /// Options as JSON in the browser schema, flags override it
    #[arg(long)]
    options: Option<String>,

    /// Virtual time in ms at which the document is printed
    #[arg(long, default_value_t = 1)]
    at: u64,

    /// Dismiss everything at this virtual time
    #[arg(long)]
    dismiss_all_at: Option<u64>,
}

fn parse_button(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(class, markup)| (class.to_string(), markup.to_string()))
        .ok_or_else(|| format!("expected CLASS=MARKUP, got {:?}", s))
}

impl Args {
    fn toast_options(&self) -> Result<ToastOptions, serde_json::Error> {
        let base = match &self.options {
            Some(json) => serde_json::from_str(json)?,
            None => ToastOptions::new(),
        };

        let mut flags = ToastOptions::new();
        if let Some(kind) = &self.kind {
            flags = flags.kind(kind.clone());
        }
        if let Some(ms) = self.dismiss_after {
            flags = flags.dismiss_after(ms);
        }
        if self.sticky {
            flags = flags.sticky();
        }
        if self.no_close {
            flags = flags.show_close_button(false);
        }
        for (class, markup) in &self.buttons {
            flags = flags.button(ButtonSpec::new(class.clone(), TrustedMarkup::from_trusted(markup.clone())));
        }

        Ok(flags.or(base))
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();

    env_logger::init();

    let args = Args::parse();
    let config = read_config!(toast).clone();
    debug!("config = {:?}", config);

    let dom = MemoryDom::new();
    let sched = VirtualScheduler::new();
    let manager = ToastManager::new(dom.clone(), sched.clone(), config);
    manager.init()?;

    let options = args.toast_options()?;
    let handles = args.messages.iter()
        .map(|message| manager.default(message, options.clone()))
        .collect::<Result<Vec<_>, _>>()?;

    match args.dismiss_all_at {
        Some(when) if when <= args.at => {
            sched.advance(when);
            manager.dismiss_all();
            sched.advance(args.at - when);
        }
        Some(when) => {
            warn!("--dismiss-all-at {} is after --at {}, ignoring it", when, args.at);
            sched.advance(args.at);
        }
        None => {
            sched.advance(args.at);
        }
    }

    for handle in &handles {
        info!("toast {} is {} at t={}",
            dom.element_id(*handle.element()).unwrap_or_default(),
            handle.state(),
            sched.now(),
        );
    }

    let body = dom.body().ok_or("document has no body")?;
    println!("{}", dom.to_html(body));

    Ok(())
}
