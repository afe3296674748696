//! # Menu Loop
//!
//! The interactive state machine that maps menu choices to product
//! operations.
//!
//! ## States
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Menu State Machine                              │
//! │                                                                         │
//! │            ┌──────────────────────────────────────────┐                 │
//! │            │                                          │                 │
//! │            ▼                                          │                 │
//! │   ┌──────────────────┐  choice 1-7   ┌────────────────┴──────────┐     │
//! │   │  AwaitingChoice  │──────────────►│  CollectingInput(op)      │     │
//! │   └──────────────────┘               │  prompt fields in order,  │     │
//! │      │          ▲                    │  run op, print outcome    │     │
//! │      │          │ anything else      └───────────────────────────┘     │
//! │      │          │ ("Invalid option")                                   │
//! │      │          └──────┘                                               │
//! │      │                                                                  │
//! │      │ choice 8 / end of input                                         │
//! │      ▼                                                                  │
//! │   ┌──────────────────┐                                                 │
//! │   │     Exiting      │  terminal                                       │
//! │   └──────────────────┘                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Malformed numbers while collecting input re-prompt the same field.
//! Failed operations are reported and the loop returns to `AwaitingChoice`.

use std::str::FromStr;

use tokio::io::{AsyncBufRead, AsyncWrite};
use tokio_stream::StreamExt;
use tracing::{debug, error, info};

use crate::console::Console;
use crate::error::{CliError, CliResult};
use stockroom_core::validation::{parse_decimal, parse_id, parse_price, parse_quantity};
use stockroom_core::{NewProduct, PriceRange, SortCriterion};
use stockroom_db::{Database, ProductStream};

/// Text shown before every choice prompt.
pub const MENU_TEXT: &str = "\n\
Select an option:\n\
1. Add product\n\
2. Update product\n\
3. Delete product\n\
4. List products\n\
5. Search products by name\n\
6. Search products by price range\n\
7. List products sorted\n\
8. Exit";

const CHOICE_PROMPT: &str = "Option: ";

// =============================================================================
// Choices and States
// =============================================================================

/// A product operation reachable from the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    AddProduct,
    UpdateProduct,
    DeleteProduct,
    ListProducts,
    SearchByName,
    SearchByPriceRange,
    ListSorted,
}

/// A parsed menu selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Run(Operation),
    Exit,
}

impl FromStr for MenuChoice {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let choice = match s.trim() {
            "1" => MenuChoice::Run(Operation::AddProduct),
            "2" => MenuChoice::Run(Operation::UpdateProduct),
            "3" => MenuChoice::Run(Operation::DeleteProduct),
            "4" => MenuChoice::Run(Operation::ListProducts),
            "5" => MenuChoice::Run(Operation::SearchByName),
            "6" => MenuChoice::Run(Operation::SearchByPriceRange),
            "7" => MenuChoice::Run(Operation::ListSorted),
            "8" => MenuChoice::Exit,
            other => return Err(CliError::InvalidMenuChoice(other.to_string())),
        };
        Ok(choice)
    }
}

/// Where the menu loop is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    AwaitingChoice,
    CollectingInput(Operation),
    Exiting,
}

// =============================================================================
// Menu
// =============================================================================

/// Interactive menu over one database handle and one console.
pub struct Menu<R, W, E> {
    db: Database,
    console: Console<R, W, E>,
}

impl<R, W, E> Menu<R, W, E>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    E: AsyncWrite + Unpin,
{
    pub fn new(db: Database, console: Console<R, W, E>) -> Self {
        Menu { db, console }
    }

    /// Runs until the exit choice or end of input.
    ///
    /// Returns `Err` only for failures the loop cannot continue past
    /// (console I/O errors, a closed database handle).
    pub async fn run(&mut self) -> CliResult<()> {
        let mut state = MenuState::AwaitingChoice;

        while state != MenuState::Exiting {
            state = match self.step(state).await {
                Ok(next) => next,
                Err(CliError::InputClosed) => {
                    debug!("Input closed, leaving menu");
                    MenuState::Exiting
                }
                Err(e) => return Err(e),
            };
        }

        info!("Menu finished");
        Ok(())
    }

    /// Performs one transition.
    pub async fn step(&mut self, state: MenuState) -> CliResult<MenuState> {
        match state {
            MenuState::AwaitingChoice => self.await_choice().await,
            MenuState::CollectingInput(operation) => {
                match self.execute(operation).await {
                    Ok(()) => {}
                    Err(e) if e.is_recoverable() => self.report(&e).await?,
                    Err(e) => return Err(e),
                }
                Ok(MenuState::AwaitingChoice)
            }
            MenuState::Exiting => Ok(MenuState::Exiting),
        }
    }

    /// Releases the handle and console.
    pub fn into_parts(self) -> (Database, Console<R, W, E>) {
        (self.db, self.console)
    }

    async fn await_choice(&mut self) -> CliResult<MenuState> {
        self.console.notice(MENU_TEXT).await?;
        let answer = self.console.prompt(CHOICE_PROMPT).await?;

        match answer.parse::<MenuChoice>() {
            Ok(MenuChoice::Run(operation)) => {
                debug!(?operation, "Menu choice");
                Ok(MenuState::CollectingInput(operation))
            }
            Ok(MenuChoice::Exit) => Ok(MenuState::Exiting),
            Err(e) => {
                self.report(&e).await?;
                Ok(MenuState::AwaitingChoice)
            }
        }
    }

    /// Prints a recoverable error: storage failures on the error stream,
    /// input problems as a plain notice.
    async fn report(&mut self, err: &CliError) -> CliResult<()> {
        match err {
            CliError::Db(db_err) => {
                error!(error = %db_err, "Operation failed");
                self.console.error(&format!("Error: {}", db_err)).await
            }
            other => self.console.notice(&other.to_string()).await,
        }
    }

    async fn execute(&mut self, operation: Operation) -> CliResult<()> {
        match operation {
            Operation::AddProduct => self.add_product().await,
            Operation::UpdateProduct => self.update_product().await,
            Operation::DeleteProduct => self.delete_product().await,
            Operation::ListProducts => {
                let repo = self.db.products();
                self.render(repo.list_all(), "No products in inventory.").await
            }
            Operation::SearchByName => {
                let substring = self.console.prompt("Product name to search: ").await?;
                let repo = self.db.products();
                self.render(
                    repo.search_by_name(&substring),
                    "No products found with that name.",
                )
                .await
            }
            Operation::SearchByPriceRange => {
                let min = self
                    .console
                    .prompt_parsed("Minimum price: ", |s| parse_decimal("minimum price", s))
                    .await?;
                let max = self
                    .console
                    .prompt_parsed("Maximum price: ", |s| parse_decimal("maximum price", s))
                    .await?;
                let repo = self.db.products();
                self.render(
                    repo.search_by_price_range(PriceRange::new(min, max)),
                    "No products found in that price range.",
                )
                .await
            }
            Operation::ListSorted => {
                let answer = self.console.prompt("Sort by (name/price): ").await?;
                let criterion = SortCriterion::from_str(&answer)?;
                let repo = self.db.products();
                self.render(repo.list_sorted(criterion), "No products in inventory.")
                    .await
            }
        }
    }

    async fn add_product(&mut self) -> CliResult<()> {
        let product = self
            .collect_product(["Product name: ", "Product description: ", "Quantity: ", "Price: "])
            .await?;

        let id = self.db.products().insert(&product).await?;
        self.console
            .notice(&format!("Product added with ID {}.", id))
            .await
    }

    async fn update_product(&mut self) -> CliResult<()> {
        let id = self
            .console
            .prompt_parsed("ID of product to update: ", parse_id)
            .await?;
        let product = self
            .collect_product([
                "New product name: ",
                "New product description: ",
                "New quantity: ",
                "New price: ",
            ])
            .await?;

        let matched = self.db.products().update(id, &product).await?;
        self.console.notice("Product updated.").await?;
        if !matched {
            self.console
                .notice(&format!("Note: no product has ID {}; nothing was changed.", id))
                .await?;
        }
        Ok(())
    }

    async fn delete_product(&mut self) -> CliResult<()> {
        let id = self
            .console
            .prompt_parsed("ID of product to delete: ", parse_id)
            .await?;

        let matched = self.db.products().delete(id).await?;
        self.console.notice("Product deleted.").await?;
        if !matched {
            self.console
                .notice(&format!("Note: no product has ID {}; nothing was changed.", id))
                .await?;
        }
        Ok(())
    }

    /// Prompts name, description, quantity, price in that order.
    async fn collect_product(&mut self, labels: [&str; 4]) -> CliResult<NewProduct> {
        let [name_label, description_label, quantity_label, price_label] = labels;

        let name = self.console.prompt(name_label).await?;
        let description = self.console.prompt(description_label).await?;
        let quantity = self
            .console
            .prompt_parsed(quantity_label, parse_quantity)
            .await?;
        let price = self.console.prompt_parsed(price_label, parse_price).await?;

        Ok(NewProduct {
            name,
            description,
            quantity,
            price,
        })
    }

    /// Prints rows as they arrive; prints `empty_notice` if there were none.
    async fn render(&mut self, mut rows: ProductStream<'_>, empty_notice: &str) -> CliResult<()> {
        let mut shown = 0usize;

        while let Some(row) = rows.next().await {
            let product = row?;
            self.console.notice(&product.to_string()).await?;
            shown += 1;
        }

        if shown == 0 {
            self.console.notice(empty_notice).await?;
        }

        debug!(shown, "Rendered products");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
