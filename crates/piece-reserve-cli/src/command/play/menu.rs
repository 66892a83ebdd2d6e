use std::{
    io::{BufRead, Write},
    str::FromStr,
};

use anyhow::Context as _;
use piece_reserve_engine::{GameAction, GameController, GameStats, Piece};

const RULE: &str = "==============================";

/// How the state is printed before each menu prompt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum StateFormat {
    /// Human-readable listing of the queue and the reserve stack
    #[default]
    Text,
    /// One JSON object per prompt
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Action(GameAction),
    Quit,
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("invalid menu option")]
struct InvalidChoiceError;

impl FromStr for MenuChoice {
    type Err = InvalidChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let number = s.trim().parse::<i64>().map_err(|_| InvalidChoiceError)?;
        let choice = match number {
            0 => Self::Quit,
            1 => Self::Action(GameAction::Play),
            2 => Self::Action(GameAction::Reserve),
            3 => Self::Action(GameAction::UseReserved),
            4 => Self::Action(GameAction::SwapFront),
            5 => Self::Action(GameAction::SwapMultiple),
            _ => return Err(InvalidChoiceError),
        };
        Ok(choice)
    }
}

/// Runs the interactive menu until the player quits or the input ends.
pub(crate) fn run<R, W>(
    controller: &mut GameController,
    mut input: R,
    mut output: W,
    format: StateFormat,
) -> anyhow::Result<()>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "Piece seed: {}", controller.seed())
        .context("Failed to write to console")?;

    let mut buf = Vec::new();
    loop {
        write_state(&mut output, controller, format)?;
        write_menu(&mut output)?;

        buf.clear();
        let read = input
            .read_until(b'\n', &mut buf)
            .context("Failed to read menu choice")?;
        // undecodable bytes become replacement characters and fail to parse
        let line = String::from_utf8_lossy(&buf);
        if read == 0 {
            log::debug!("input closed, ending session");
            writeln!(output).context("Failed to write to console")?;
            break;
        }

        match line.parse::<MenuChoice>() {
            Ok(MenuChoice::Quit) => break,
            Ok(MenuChoice::Action(action)) => {
                let message = match controller.apply(action) {
                    Ok(report) => format!("{report}."),
                    Err(error) => format!("Action rejected: {error}."),
                };
                writeln!(output, "\n{message}").context("Failed to write to console")?;
            }
            Err(error) => {
                log::debug!("{error}: {:?}", line.trim());
                writeln!(output, "\nInvalid option! Try again.")
                    .context("Failed to write to console")?;
            }
        }
    }

    writeln!(output, "\nExiting...").context("Failed to write to console")?;
    write_stats(&mut output, controller.stats())?;
    output.flush().context("Failed to flush console output")?;
    Ok(())
}

fn write_pieces<W, I>(output: &mut W, pieces: I) -> anyhow::Result<()>
where
    W: Write,
    I: IntoIterator<Item = Piece>,
{
    let mut pieces = pieces.into_iter().peekable();
    if pieces.peek().is_none() {
        writeln!(output, "(empty)")?;
        return Ok(());
    }
    for piece in pieces {
        write!(output, "{piece} ")?;
    }
    writeln!(output)?;
    Ok(())
}

fn write_state<W>(
    output: &mut W,
    controller: &GameController,
    format: StateFormat,
) -> anyhow::Result<()>
where
    W: Write,
{
    match format {
        StateFormat::Text => {
            writeln!(output, "\n{RULE}")?;
            writeln!(output, "CURRENT STATE")?;
            writeln!(output, "\nPiece queue:")?;
            write_pieces(output, controller.queue().iter())?;
            writeln!(output, "\nReserve stack (top -> base):")?;
            write_pieces(output, controller.reserve_stack().iter())?;
            writeln!(output, "{RULE}")?;
        }
        StateFormat::Json => {
            serde_json::to_writer(&mut *output, &controller.snapshot())
                .context("Failed to write state as JSON")?;
            writeln!(output)?;
        }
    }
    Ok(())
}

fn write_menu<W>(output: &mut W) -> anyhow::Result<()>
where
    W: Write,
{
    writeln!(output, "\nOptions:")?;
    writeln!(output, "1 - Play the front piece")?;
    writeln!(output, "2 - Move the front piece to the reserve stack")?;
    writeln!(output, "3 - Use the reserved piece")?;
    writeln!(output, "4 - Swap the queue front with the stack top")?;
    writeln!(output, "5 - Swap the first 3 queue pieces with the 3 reserved pieces")?;
    writeln!(output, "0 - Quit")?;
    write!(output, "Choice: ")?;
    output.flush().context("Failed to flush console output")?;
    Ok(())
}

fn write_stats<W>(output: &mut W, stats: &GameStats) -> anyhow::Result<()>
where
    W: Write,
{
    writeln!(output, "Pieces played: {}", stats.played_pieces())?;
    writeln!(output, "Pieces reserved: {}", stats.reserved_pieces())?;
    writeln!(output, "Reserved pieces used: {}", stats.used_pieces())?;
    writeln!(output, "Single swaps: {}", stats.front_swaps())?;
    writeln!(output, "Multiple swaps: {}", stats.multiple_swaps())?;
    writeln!(output, "Rejected actions: {}", stats.rejected_actions())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use piece_reserve_engine::PieceSeed;

    use super::*;

    const SEED: PieceSeed = PieceSeed::from_bytes([7; 16]);

    fn run_with_input(input: &str, format: StateFormat) -> (GameController, String) {
        let mut controller = GameController::with_seed(SEED);
        let mut output = Vec::new();
        run(&mut controller, input.as_bytes(), &mut output, format).unwrap();
        (controller, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_menu_choice_parsing() {
        assert_eq!("0".parse::<MenuChoice>().unwrap(), MenuChoice::Quit);
        assert_eq!(
            " 1\n".parse::<MenuChoice>().unwrap(),
            MenuChoice::Action(GameAction::Play)
        );
        assert_eq!(
            "5".parse::<MenuChoice>().unwrap(),
            MenuChoice::Action(GameAction::SwapMultiple)
        );
        assert!("6".parse::<MenuChoice>().is_err());
        assert!("-1".parse::<MenuChoice>().is_err());
        assert!("two".parse::<MenuChoice>().is_err());
        assert!("".parse::<MenuChoice>().is_err());
    }

    #[test]
    fn test_quit_immediately() {
        let (controller, output) = run_with_input("0\n", StateFormat::Text);

        assert!(output.starts_with(&format!("Piece seed: {SEED}\n")));
        assert!(output.contains("Piece queue:\n["));
        assert!(output.contains("Reserve stack (top -> base):\n(empty)\n"));
        assert!(output.contains("Exiting..."));
        assert_eq!(controller.queue().len(), 5);
        assert_eq!(controller.stats().rejected_actions(), 0);
    }

    #[test]
    fn test_end_of_input_ends_session() {
        let (_, output) = run_with_input("", StateFormat::Text);
        assert!(output.contains("Exiting..."));
    }

    #[test]
    fn test_invalid_options_leave_state_unchanged() {
        let before = GameController::with_seed(SEED).snapshot();
        let (controller, output) = run_with_input("9\nabc\n-3\n0\n", StateFormat::Text);

        assert_eq!(output.matches("Invalid option! Try again.").count(), 3);
        assert_eq!(controller.snapshot(), before);
        assert_eq!(controller.stats().rejected_actions(), 0);
    }

    #[test]
    fn test_non_utf8_input_is_an_invalid_option() {
        let mut controller = GameController::with_seed(SEED);
        let mut output = Vec::new();
        run(
            &mut controller,
            &b"\xff\xfe\n1\n0\n"[..],
            &mut output,
            StateFormat::Text,
        )
        .unwrap();
        let output = String::from_utf8(output).unwrap();

        assert_eq!(output.matches("Invalid option! Try again.").count(), 1);
        assert!(output.contains("Played piece: "));
        assert_eq!(controller.stats().played_pieces(), 1);
    }

    #[test]
    fn test_actions_are_applied_in_order() {
        let (controller, output) = run_with_input("2\n2\n2\n5\n1\n0\n", StateFormat::Text);

        assert!(output.contains(" 0] reserved."));
        assert!(output.contains("Swapped the first 3 queue pieces with the reserve stack."));
        assert!(output.contains("Played piece: "));
        assert!(output.contains("Pieces reserved: 3"));
        assert!(output.contains("Multiple swaps: 1"));

        let stack_ids: Vec<_> = controller
            .reserve_stack()
            .iter()
            .map(|p| p.id().get())
            .collect();
        assert_eq!(stack_ids, [3, 4, 5]);
    }

    #[test]
    fn test_rejected_actions_are_reported() {
        let (controller, output) = run_with_input("3\n4\n5\n0\n", StateFormat::Text);

        assert!(output.contains("Action rejected: reserve stack is empty"));
        assert!(output.contains("Action rejected: not enough pieces to swap."));
        assert!(output.contains("Action rejected: multiple swap not possible"));
        assert_eq!(controller.stats().rejected_actions(), 3);
        assert!(output.contains("Rejected actions: 3"));
    }

    #[test]
    fn test_json_state_format() {
        let (_, output) = run_with_input("2\n0\n", StateFormat::Json);

        let states: Vec<serde_json::Value> = output
            .lines()
            .filter(|line| line.starts_with('{'))
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(states.len(), 2);
        assert_eq!(states[0]["reserve"].as_array().unwrap().len(), 0);
        assert_eq!(states[1]["reserve"].as_array().unwrap().len(), 1);
        assert_eq!(states[1]["next_id"], 6);
        assert!(!output.contains("CURRENT STATE"));
    }
}
