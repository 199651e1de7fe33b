//! Interactive check-in session.
//!
//! Each stdin line is a gesture: plain text is typed input, `/`-prefixed
//! lines are commands. In live mode a tokio interval feeds wall-clock time
//! into the controller; with `--manual-clock` time only moves on `/wait`.

use std::time::Duration;

use auvra_core::{
    format_elapsed, Config, ConversationController, Event, Message, Mode, SliderValue,
};
use clap::Args;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{Instant, MissedTickBehavior};

const TICK_MS: u64 = 50;

const HELP: &str = "\
commands:
  /mode <idle|type|tap|yap>  switch input mode
  /slider <1-9>              rate bloating (idle mode)
  /choices                   list tap-mode reasons
  /toggle <id>               select or deselect a reason
  /draft <text>              replace the type-mode draft
  /send                      send choices (tap), recording (yap) or draft (type)
  /record                    start recording (yap)
  /stop                      stop recording
  /show                      print the active transcript
  /state                     print a state snapshot
  /wait <ms>                 advance the clock
  /help                      this text
  /quit                      end the session
anything else is typed text (type mode)";

#[derive(Args)]
pub struct ChatArgs {
    /// Print every event as a JSON line
    #[arg(long)]
    json: bool,
    /// Only advance time with /wait
    #[arg(long)]
    manual_clock: bool,
}

enum Flow {
    Continue,
    Quit,
}

struct Printer {
    json: bool,
}

impl Printer {
    fn event(&self, controller: &ConversationController, event: &Event) -> serde_json::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string(event)?);
            return Ok(());
        }
        match event {
            Event::ModeChanged { from, to, .. } if from != to => println!("[mode] {from} -> {to}"),
            Event::ModeChanged { .. } => {}
            Event::MessageAppended { message, .. } => print_message(message),
            Event::TranscriptRevealed { messages, .. } => messages.iter().for_each(print_message),
            Event::SliderSelected { reading, .. } => println!(
                "[slider] {} = {} ({})",
                reading.value,
                reading.label,
                reading.tint.hex()
            ),
            Event::ChoiceToggled { option_id, selected, .. } => {
                let label = controller
                    .catalog()
                    .get(option_id)
                    .map(|o| o.label.as_str())
                    .unwrap_or(option_id.as_str());
                println!("[tap] [{}] {label}", if *selected { "x" } else { " " });
            }
            Event::RecordingStarted { .. } => println!("[rec] recording..."),
            Event::RecordingTicked { elapsed_seconds, .. } => {
                println!("[rec] {}", format_elapsed(u64::from(*elapsed_seconds)))
            }
            Event::RecordingStopped { elapsed_seconds, .. } => {
                println!("[rec] stopped at {}", format_elapsed(u64::from(*elapsed_seconds)))
            }
            Event::RecordingSent { message, elapsed_seconds, .. } => println!(
                "  you: {} ({})",
                message.text,
                format_elapsed(u64::from(*elapsed_seconds))
            ),
            Event::ScrollRequested { .. } | Event::DraftChanged { .. } => {}
            other => println!("{}", serde_json::to_string(other)?),
        }
        Ok(())
    }

    fn events(&self, controller: &ConversationController, events: &[Event]) -> serde_json::Result<()> {
        events.iter().try_for_each(|e| self.event(controller, e))
    }
}

fn print_message(message: &Message) {
    let who = if message.is_bot { "bot" } else { "you" };
    println!("  {who}: {}", message.text);
}

pub fn run(args: ChatArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    runtime.block_on(session(args, config))
}

async fn session(args: ChatArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut controller = ConversationController::from_config(config);
    let printer = Printer { json: args.json };

    if !args.json {
        println!("{}", controller.intro_question());
        println!("(rate 1-9 with /slider, or /mode tap|yap|type; /help for commands)");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(Duration::from_millis(TICK_MS));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last_tick = Instant::now();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match handle_line(&mut controller, &printer, line.trim()) {
                    Ok(Flow::Continue) => {}
                    Ok(Flow::Quit) => break,
                    // Bad input never ends the session.
                    Err(e) => {
                        tracing::debug!(error = %e, "rejected input line");
                        eprintln!("error: {e}");
                    }
                }
            }
            _ = ticker.tick(), if !args.manual_clock => {
                let now = Instant::now();
                let delta = now.duration_since(last_tick).as_millis() as u64;
                last_tick = now;
                let events = controller.advance(delta);
                printer.events(&controller, &events)?;
            }
        }
    }

    let event = controller.teardown();
    printer.event(&controller, &event)?;
    Ok(())
}

fn handle_line(
    controller: &mut ConversationController,
    printer: &Printer,
    line: &str,
) -> Result<Flow, Box<dyn std::error::Error>> {
    if line.is_empty() {
        return Ok(Flow::Continue);
    }

    let Some(command) = line.strip_prefix('/') else {
        if controller.mode() != Mode::Type {
            tracing::debug!(mode = %controller.mode(), "typed text outside type mode");
            eprintln!("(switch to type mode with /mode type to send text)");
            return Ok(Flow::Continue);
        }
        let event = controller.submit_text(line);
        printer.events(controller, event.as_slice())?;
        return Ok(Flow::Continue);
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };

    let events: Vec<Event> = match name {
        "mode" => vec![controller.set_mode(arg.parse::<Mode>()?)],
        "slider" => {
            let value = SliderValue::new(arg.parse::<u8>()?)?;
            let event = controller.select_slider_value(value);
            if event.is_none() {
                eprintln!("(the slider is only available in idle mode before rating)");
            }
            event.into_iter().collect()
        }
        "choices" => {
            for option in controller.catalog().options() {
                let mark = if controller.selection().is_selected(&option.id) { "x" } else { " " };
                println!("  [{mark}] {:<14} {}", option.id, option.label);
            }
            Vec::new()
        }
        "toggle" => {
            controller.catalog().get(arg)?;
            let event = controller.toggle_choice(arg);
            if event.is_none() {
                eprintln!("(choices are only available in tap mode)");
            }
            event.into_iter().collect()
        }
        "send" => match controller.mode() {
            Mode::Tap => controller.send_selected_choices().into_iter().collect(),
            Mode::Yap => controller.send_recording().into_iter().collect(),
            Mode::Type => controller.submit_draft().into_iter().collect(),
            Mode::Idle => Vec::new(),
        },
        "draft" => vec![controller.set_draft(arg)],
        "record" => {
            let event = controller.start_recording();
            if event.is_none() && controller.mode() != Mode::Yap {
                eprintln!("(recording is only available in yap mode)");
            }
            event.into_iter().collect()
        }
        "stop" => controller.stop_recording().into_iter().collect(),
        "show" => {
            controller.active_transcript().iter().for_each(print_message);
            Vec::new()
        }
        "state" => vec![controller.snapshot()],
        "wait" => controller.advance(arg.parse::<u64>()?),
        "help" => {
            println!("{HELP}");
            Vec::new()
        }
        "quit" | "exit" => return Ok(Flow::Quit),
        other => {
            eprintln!("unknown command: /{other} (try /help)");
            Vec::new()
        }
    };

    printer.events(controller, &events)?;
    Ok(Flow::Continue)
}
