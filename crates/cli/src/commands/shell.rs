//! Interactive session over one in-memory store.
//!
//! Each input line is split into words (single and double quotes group
//! words) and parsed with clap as one [`ShellCommand`].

use std::io::Write;

use clap::{CommandFactory, Parser, Subcommand};
use pawcart_app::AppState;
use pawcart_app::catalog::{CartView, Catalog, EmptyState};
use pawcart_app::navigation::Alert;
use pawcart_app::state::HttpPetSubmission;
use pawcart_core::{CartItemId, Pet, PetForm};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

const PROMPT: &str = "pawcart> ";

#[derive(Parser, Debug)]
#[command(
    name = "pawcart",
    no_binary_name = true,
    disable_help_subcommand = true,
    disable_version_flag = true
)]
struct Line {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum ShellCommand {
    /// Add a new pet
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        breed: String,
        #[arg(long)]
        age: String,
        #[arg(long)]
        price: String,
    },
    /// Show the current pet
    Show,
    /// Move to the next pet
    Next,
    /// Move to the previous pet
    Prev,
    /// Jump to a pet by position (1-based)
    Goto { position: i64 },
    /// Put the current pet in the cart
    Buy,
    /// Delete the current pet and its cart items
    Delete,
    /// Show the cart
    Cart,
    /// Remove one item from the cart
    Remove { id: String },
    /// Remove every item from the cart
    Clear,
    /// Check out
    Checkout,
    /// List commands
    Help,
    /// Leave the session
    #[command(alias = "exit")]
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
enum SplitError {
    #[error("Unterminated quote")]
    UnterminatedQuote,
}

/// Split a line into words, honouring single and double quotes.
fn split_words(line: &str) -> Result<Vec<String>, SplitError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), c) => current.push(c),
            (None, '"' | '\'') => {
                quote = Some(c);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if quote.is_some() {
        return Err(SplitError::UnterminatedQuote);
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

struct Session<'a, W> {
    catalog: Catalog,
    submission: HttpPetSubmission,
    out: &'a mut W,
}

enum Flow {
    Continue,
    Quit,
}

/// Run the session until `quit` or end of input.
///
/// # Errors
///
/// Returns error if input cannot be read or output cannot be written.
pub async fn run<R, W>(state: &AppState, input: R, out: &mut W) -> pawcart_app::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut session = Session {
        catalog: state.catalog(),
        submission: state.submission(),
        out,
    };
    let mut lines = input.lines();

    session.show()?;
    loop {
        write!(session.out, "{PROMPT}")?;
        session.out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(session.out)?;
            break;
        };

        if let Flow::Quit = session.handle_line(&line).await? {
            break;
        }
    }
    Ok(())
}

impl<W: Write> Session<'_, W> {
    async fn handle_line(&mut self, line: &str) -> pawcart_app::Result<Flow> {
        let words = match split_words(line) {
            Ok(words) if words.is_empty() => return Ok(Flow::Continue),
            Ok(words) => words,
            Err(e) => {
                writeln!(self.out, "{e}")?;
                return Ok(Flow::Continue);
            }
        };

        let command = match Line::try_parse_from(words) {
            Ok(parsed) => parsed.command,
            Err(e) => {
                write!(self.out, "{e}")?;
                return Ok(Flow::Continue);
            }
        };
        debug!(?command, "Shell command");

        match command {
            ShellCommand::Add {
                name,
                breed,
                age,
                price,
            } => self.add(PetForm::new(name, breed, age, price)).await?,
            ShellCommand::Show => self.show()?,
            ShellCommand::Next => {
                self.catalog.next();
                self.show()?;
            }
            ShellCommand::Prev => {
                self.catalog.previous();
                self.show()?;
            }
            ShellCommand::Goto { position } => {
                if self.catalog.store().set_current_index(position.saturating_sub(1)) {
                    self.show()?;
                } else {
                    writeln!(self.out, "No pet at position {position}.")?;
                }
            }
            ShellCommand::Buy => match self.catalog.add_current_to_cart() {
                Some(item) => self.alert(&Catalog::added_to_cart_alert(&item))?,
                None => self.show()?,
            },
            ShellCommand::Delete => match self.catalog.delete_current_pet() {
                Some(summary) => self.alert(&summary.alert())?,
                None => self.show()?,
            },
            ShellCommand::Cart => self.cart()?,
            ShellCommand::Remove { id } => {
                if self.catalog.remove_item(&CartItemId::new(id.as_str())) {
                    writeln!(self.out, "Removed {id} from cart.")?;
                } else {
                    writeln!(self.out, "No cart item {id}.")?;
                }
            }
            ShellCommand::Clear => {
                self.catalog.clear();
                writeln!(self.out, "Cart cleared.")?;
            }
            ShellCommand::Checkout => self.alert(&Catalog::checkout_alert())?,
            ShellCommand::Help => {
                write!(self.out, "{}", Line::command().render_help())?;
            }
            ShellCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    async fn add(&mut self, form: PetForm) -> pawcart_app::Result<()> {
        if let Err(errors) = form.validate() {
            for error in errors.iter() {
                writeln!(self.out, "  {error}")?;
            }
            return Ok(());
        }

        writeln!(self.out, "Adding {}...", form.pet_name.trim())?;
        let outcome = self.submission.submit(&form).await;
        if let Some(alert) = outcome.alert() {
            self.alert(&alert)?;
        }
        Ok(())
    }

    fn show(&mut self) -> pawcart_app::Result<()> {
        if let Some(empty) = self.catalog.landing() {
            return self.empty(empty);
        }

        let (Some(label), Some(pet)) = (self.catalog.counter_label(), self.catalog.current_pet())
        else {
            return Ok(());
        };
        writeln!(self.out, "{label}")?;
        self.pet(&pet)?;
        if self.catalog.can_navigate() {
            writeln!(self.out, "  (prev / next to browse)")?;
        }
        Ok(())
    }

    fn pet(&mut self, pet: &Pet) -> pawcart_app::Result<()> {
        writeln!(self.out, "  {} ({})", pet.pet_name, pet.breed)?;
        writeln!(
            self.out,
            "  {} years old, {}",
            pet.age,
            pet.price.display()
        )?;
        if pet.has_image() {
            writeln!(self.out, "  {}", pet.image_url)?;
        } else {
            writeln!(self.out, "  (no image)")?;
        }
        Ok(())
    }

    fn cart(&mut self) -> pawcart_app::Result<()> {
        let view: CartView = self.catalog.cart();
        if let Some(empty) = view.empty_state() {
            return self.empty(empty);
        }

        writeln!(self.out, "My Cart ({})", view.subtitle())?;
        for line in &view.lines {
            writeln!(
                self.out,
                "  [{}] {} ({}) {} - added {}",
                line.id,
                line.name,
                line.breed,
                line.price.as_deref().unwrap_or("-"),
                line.added
            )?;
        }
        writeln!(self.out, "  {}", view.checkout_label())?;
        Ok(())
    }

    fn empty(&mut self, empty: EmptyState) -> pawcart_app::Result<()> {
        writeln!(self.out, "{}", empty.title)?;
        writeln!(self.out, "  {}", empty.message)?;
        writeln!(self.out, "  [{}]", empty.action.label())?;
        Ok(())
    }

    fn alert(&mut self, alert: &Alert) -> pawcart_app::Result<()> {
        writeln!(self.out, "{alert}")?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pawcart_app::config::AppConfig;

    use super::*;

    fn offline_state() -> AppState {
        // Port 9 refuses connections, so both requests fail fast.
        let config = AppConfig::from_lookup(|key| match key {
            "PAWCART_IMAGE_URL" => Some("http://127.0.0.1:9/image".to_string()),
            "PAWCART_ECHO_URL" => Some("http://127.0.0.1:9/echo".to_string()),
            "PAWCART_HTTP_TIMEOUT_MS" => Some("500".to_string()),
            _ => None,
        })
        .unwrap();
        AppState::new(config).unwrap()
    }

    async fn session_output(state: &AppState, input: &str) -> String {
        let mut out = Vec::new();
        run(state, input.as_bytes(), &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_split_words() {
        assert_eq!(
            split_words(r#"add --name "Sir Barks" --breed 'Golden Retriever'"#).unwrap(),
            vec!["add", "--name", "Sir Barks", "--breed", "Golden Retriever"]
        );
        assert_eq!(split_words("   ").unwrap(), Vec::<String>::new());
        assert_eq!(split_words(r#"add --name """#).unwrap(), vec!["add", "--name", ""]);
        assert_eq!(
            split_words("add --name \"Rex").unwrap_err(),
            SplitError::UnterminatedQuote
        );
    }

    #[test]
    fn test_parse_commands() {
        let parse = |line: &str| Line::try_parse_from(split_words(line).unwrap()).map(|l| l.command);

        assert_eq!(parse("goto 3").unwrap(), ShellCommand::Goto { position: 3 });
        assert_eq!(parse("exit").unwrap(), ShellCommand::Quit);
        assert_eq!(
            parse("add --name Rex --breed Pug --age 2 --price 99").unwrap(),
            ShellCommand::Add {
                name: "Rex".to_string(),
                breed: "Pug".to_string(),
                age: "2".to_string(),
                price: "99".to_string(),
            }
        );
        assert!(parse("add --name Rex").is_err());
        assert!(parse("fly").is_err());
    }

    #[tokio::test]
    async fn test_empty_session_shows_landing_and_cart_empty_state() {
        let state = offline_state();
        let output = session_output(&state, "cart\ncheckout\nquit\n").await;

        assert!(output.contains("No Pets Found"));
        assert!(output.contains("Your cart is empty"));
        assert!(output.contains("Checkout feature coming soon!"));
    }

    #[tokio::test]
    async fn test_invalid_form_is_not_submitted() {
        let state = offline_state();
        let output =
            session_output(&state, "add --name R --breed Pug --age 40 --price 0.5\n").await;

        assert!(output.contains("Pet name must be at least 2 characters"));
        assert!(output.contains("Age must be less than 30 years"));
        assert!(output.contains("Price must be at least 1"));
        assert!(state.store().pets().is_empty());
    }

    #[tokio::test]
    async fn test_offline_add_commits_then_reports_failure() {
        let state = offline_state();
        let output = session_output(
            &state,
            "add --name Rex --breed Pug --age 2 --price 99\nshow\nbuy\ncart\ndelete\nquit\n",
        )
        .await;

        assert!(output.contains("Failed to add pet. Please try again."));
        assert!(output.contains("Pet 1 of 1"));
        assert!(output.contains("(no image)"));
        assert!(output.contains("Rex added to cart!"));
        assert!(output.contains("My Cart (1 item)"));
        assert!(output.contains("Rex has been removed and 1 item(s) from cart."));
        assert!(state.store().pets().is_empty());
        assert_eq!(state.store().total_items(), 0);
    }
}
