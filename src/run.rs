use std::io::{BufRead, Write};
use std::str::FromStr;

use strum_macros::{Display, EnumString};

use crate::billing::{Invoice, LineItem};
use crate::error::RegisterError;
use crate::input::{self, Console, ItemName, MessageType, COMMAND_PROMPT};

/* Command Structure
 *
 * new
 * add item    -> name ("cancel" aborts), quantity, price per unit
 * remove item -> 1-based index
 * status
 * scrap       -> y/n
 * done
 * exit        -> y/n while an invoice is open
 */

#[derive(Display, EnumString, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Command {
    #[strum(serialize = "new")]
    New,
    #[strum(serialize = "add item")]
    AddItem,
    #[strum(serialize = "remove item")]
    RemoveItem,
    #[strum(serialize = "status")]
    Status,
    #[strum(serialize = "scrap")]
    Scrap,
    #[strum(serialize = "done")]
    Done,
    #[strum(serialize = "exit")]
    Exit,
}

#[derive(Debug, PartialEq, Clone, Default)]
pub enum Session {
    #[default]
    Idle,
    Editing(Invoice),
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Flow {
    Continue,
    Exit,
}

const NO_INVOICE: &str = "No invoice is being processed";

type MaybeExit = Result<Flow, RegisterError>;

/// Owns the single invoice in progress and interprets operator commands.
#[derive(Debug, Default)]
pub struct Register {
    session: Session,
    opened: usize,
}

impl Register {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn invoice(&self) -> Option<&Invoice> {
        match &self.session {
            Session::Idle => None,
            Session::Editing(invoice) => Some(invoice),
        }
    }

    /// Read and execute commands until the operator exits.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
    ) -> Result<(), RegisterError> {
        console.info("Running")?;
        loop {
            let line = console.prompt(COMMAND_PROMPT)?;
            if self.dispatch(&line, console)? == Flow::Exit {
                break;
            }
        }
        console.info("Exiting")?;
        Ok(())
    }

    pub fn dispatch<R: BufRead, W: Write>(
        &mut self,
        line: &str,
        console: &mut Console<R, W>,
    ) -> MaybeExit {
        match Command::from_str(line) {
            Ok(cmd) => {
                log::debug!("Executing '{}'", cmd);
                self.execute(cmd, console)
            }
            Err(_) => {
                log::debug!("Unknown command '{}'", line);
                console.error("Unknown command")?;
                Ok(Flow::Continue)
            }
        }
    }

    pub fn execute<R: BufRead, W: Write>(
        &mut self,
        cmd: Command,
        console: &mut Console<R, W>,
    ) -> MaybeExit {
        match cmd {
            Command::New => self.new_invoice(console),
            Command::AddItem => self.add_item(console),
            Command::RemoveItem => self.remove_item(console),
            Command::Status => self.status(console),
            Command::Scrap => self.scrap(console),
            Command::Done => self.done(console),
            Command::Exit => self.exit(console),
        }
    }

    fn new_invoice<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
    ) -> MaybeExit {
        if let Session::Editing(_) = self.session {
            console.error("Invoice is being processed")?;
            return Ok(Flow::Continue);
        }

        self.opened += 1;
        let invoice = Invoice::new(self.opened);
        log::info!("Opened invoice #{} dated {}", invoice.number, invoice.date);
        self.session = Session::Editing(invoice);
        console.info("Created new invoice")?;
        Ok(Flow::Continue)
    }

    fn add_item<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
    ) -> MaybeExit {
        let Session::Editing(invoice) = &mut self.session else {
            console.error(NO_INVOICE)?;
            return Ok(Flow::Continue);
        };

        console.info("To cancel item addition, write \"cancel\" as item name")?;
        let name = match console.ask(
            "Item name: ",
            input::item_name,
            ("Input a valid name", MessageType::Error),
        )? {
            ItemName::Name(name) => name,
            ItemName::Cancel => {
                console.info("Cancelling add item")?;
                return Ok(Flow::Continue);
            }
        };
        let quantity = console.ask(
            "Quantity: ",
            input::quantity,
            ("Input a valid quantity", MessageType::Error),
        )?;
        let unit_price = console.ask(
            "Price per unit: ",
            input::unit_price,
            ("Input a valid price per unit", MessageType::Error),
        )?;

        let item = LineItem::new(name, quantity, unit_price)?;
        log::info!("Invoice #{}: added {}", invoice.number, item);
        invoice.add_item(item);
        console.info("Item added")?;
        Ok(Flow::Continue)
    }

    fn remove_item<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
    ) -> MaybeExit {
        let Session::Editing(invoice) = &mut self.session else {
            console.error(NO_INVOICE)?;
            return Ok(Flow::Continue);
        };

        console.plain(&invoice.render()?)?;
        if invoice.is_empty() {
            console.error("Invoice has no items")?;
            return Ok(Flow::Continue);
        }

        let size = invoice.size();
        let index = console.ask(
            "Please select an item to delete and write its index: ",
            |answer| input::item_index(answer, size),
            ("Type a valid index", MessageType::Info),
        )?;

        let removed = invoice.remove_item(index)?;
        log::info!("Invoice #{}: removed {}", invoice.number, removed);
        console.info("Item removed.")?;
        Ok(Flow::Continue)
    }

    fn status<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
    ) -> MaybeExit {
        match &self.session {
            Session::Idle => console.info(NO_INVOICE)?,
            Session::Editing(invoice) => console.plain(&invoice.render()?)?,
        }
        Ok(Flow::Continue)
    }

    fn scrap<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
    ) -> MaybeExit {
        let Session::Editing(invoice) = &self.session else {
            console.error(NO_INVOICE)?;
            return Ok(Flow::Continue);
        };
        let number = invoice.number;

        console.info("Do you really want to scrap this invoice?")?;
        if console.confirm()? {
            console.info("Scrapping current invoice")?;
            log::info!("Scrapped invoice #{}", number);
            self.session = Session::Idle;
        } else {
            console.info("Scrapping aborted")?;
        }
        Ok(Flow::Continue)
    }

    fn done<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
    ) -> MaybeExit {
        let Session::Editing(invoice) = &self.session else {
            console.error(NO_INVOICE)?;
            return Ok(Flow::Continue);
        };

        console.plain(&invoice.render()?)?;
        console.info("Invoice done")?;
        log::info!(
            "Finished invoice #{} dated {}: {} items, total {}",
            invoice.number,
            invoice.date,
            invoice.size(),
            invoice.grand_total()
        );
        self.session = Session::Idle;
        Ok(Flow::Continue)
    }

    fn exit<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
    ) -> MaybeExit {
        if let Session::Editing(_) = self.session {
            console.plain("You have an unfinished invoice, do you want to quit?")?;
            if !console.confirm()? {
                console.info("Exit aborted")?;
                return Ok(Flow::Continue);
            }
        }

        console.info("The register will now exit")?;
        Ok(Flow::Exit)
    }
}
