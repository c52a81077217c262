use hearts_core::model::card::Card;
use hearts_core::model::passing::PASS_SIZE;
use hearts_core::model::rules::{self, IllegalPlay};
use hearts_core::policy::{PassView, PlayView, PolicyError, SeatPolicy};
use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};

/// Asks a person at the terminal which card to play.
///
/// The full hand is listed with 1-based indices. Choices that are not numbers, out of range,
/// or break the follow-suit and hearts rules are rejected and the prompt repeats.
pub struct ManualPolicy<R, W> {
    input: R,
    output: W,
}

impl ManualPolicy<BufReader<Stdin>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> ManualPolicy<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    fn read_line(&mut self) -> Result<String, PolicyError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PolicyError::InputClosed);
        }
        Ok(line)
    }

    fn print_hand(&mut self, name: &str, cards: &[Card]) -> io::Result<()> {
        writeln!(self.output, "\n{name}'s hand:")?;
        for (idx, card) in cards.iter().enumerate() {
            writeln!(self.output, "{}: {}", idx + 1, card.long_name())?;
        }
        Ok(())
    }
}

fn rejection(reason: IllegalPlay) -> String {
    match reason {
        IllegalPlay::MustFollowSuit(suit) => format!("You must follow the lead suit ({}).", suit.name()),
        IllegalPlay::HeartsNotBroken => {
            "Hearts are not broken. You cannot lead with a heart.".to_string()
        }
        IllegalPlay::MustPlayOpeningCard => "The two of clubs must open the round.".to_string(),
    }
}

impl<R, W> SeatPolicy for ManualPolicy<R, W>
where
    R: BufRead + Send,
    W: Write + Send,
{
    fn choose_card(&mut self, view: &PlayView<'_>) -> Result<Card, PolicyError> {
        let cards = view.hand.cards();
        if cards.is_empty() {
            return Err(PolicyError::EmptyHand);
        }
        if !view.trick.is_empty() {
            let played: Vec<String> = view
                .trick
                .plays()
                .iter()
                .map(|play| format!("{} {}", play.position, play.card))
                .collect();
            writeln!(self.output, "\nOn the table: {}", played.join(", "))?;
        }
        self.print_hand(view.name, cards)?;

        loop {
            write!(self.output, "Choose a card to play (enter the number): ")?;
            self.output.flush()?;
            let line = self.read_line()?;

            let choice = match line.trim().parse::<usize>() {
                Ok(n) if (1..=cards.len()).contains(&n) => cards[n - 1],
                _ => {
                    writeln!(self.output, "Invalid choice. Please select a valid card.")?;
                    continue;
                }
            };

            if view.legal.contains(&choice) {
                return Ok(choice);
            }
            let message = match rules::check_play(
                view.hand,
                choice,
                view.lead_suit,
                view.penalty_unlocked,
            ) {
                Err(reason) => rejection(reason),
                Ok(()) => rejection(IllegalPlay::MustPlayOpeningCard),
            };
            writeln!(self.output, "{message}")?;
        }
    }

    fn choose_pass(&mut self, view: &PassView<'_>) -> Result<[Card; PASS_SIZE], PolicyError> {
        let cards = view.hand.cards();
        if cards.len() < PASS_SIZE {
            return Err(PolicyError::ShortHand);
        }
        self.print_hand(view.name, cards)?;

        loop {
            write!(
                self.output,
                "Choose three cards to pass {} (e.g. 1 5 9): ",
                view.direction.as_str().to_lowercase()
            )?;
            self.output.flush()?;
            let line = self.read_line()?;

            let picks: Vec<usize> = line
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter(|part| !part.is_empty())
                .filter_map(|part| part.parse().ok())
                .collect();
            let valid = picks.len() == PASS_SIZE
                && picks.iter().all(|n| (1..=cards.len()).contains(n))
                && picks[0] != picks[1]
                && picks[0] != picks[2]
                && picks[1] != picks[2];
            if !valid {
                writeln!(self.output, "Pick three different card numbers.")?;
                continue;
            }
            return Ok([cards[picks[0] - 1], cards[picks[1] - 1], cards[picks[2] - 1]]);
        }
    }

    fn kind(&self) -> &'static str {
        "manual"
    }
}
