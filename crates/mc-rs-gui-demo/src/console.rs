//! A terminal host: views are printed, clicks and closes are typed.

use std::collections::HashMap;
use std::str::FromStr;

use thiserror::Error;
use tracing::{debug, info, warn};

use mc_rs_gui::{
    ButtonSound, Click, ItemView, MenuHost, MenuId, MenuManager, MenuView, RawAction, ViewHandle,
    Viewer, ViewerId,
};

use crate::catalog::Sample;

// ─── Host ────────────────────────────────────────────────────────────────────

/// Prints everything the toolkit shows and remembers what is on screen.
#[derive(Debug, Default)]
pub struct ConsoleHost {
    json: bool,
    views: HashMap<ViewerId, MenuView>,
    /// Items the viewer put into the open view, by handle and slot.
    placed: HashMap<(ViewHandle, usize), ItemView>,
}

impl ConsoleHost {
    pub fn new(json: bool) -> Self {
        Self {
            json,
            ..Self::default()
        }
    }

    /// The view `viewer` currently has on screen.
    pub fn view(&self, viewer: ViewerId) -> Option<&MenuView> {
        self.views.get(&viewer)
    }

    fn place(&mut self, handle: ViewHandle, slot: usize, item: ItemView) {
        self.placed.insert((handle, slot), item);
    }

    fn take(&mut self, handle: ViewHandle, slot: usize) -> Option<ItemView> {
        self.placed.remove(&(handle, slot))
    }

    fn print(&self, view: &MenuView) {
        if self.json {
            match serde_json::to_string_pretty(view) {
                Ok(json) => println!("{json}"),
                Err(e) => warn!("Failed to encode view: {e}"),
            }
            return;
        }
        println!("== {} (page {}, {} slots) ==", view.title, view.page, view.size);
        for (slot, item) in view.slots.iter().enumerate() {
            if let Some(item) = item {
                println!("  {slot:>2}: {}", describe(item));
            }
        }
    }
}

fn describe(item: &ItemView) -> String {
    let mut line = format!("{} x{} {:?}", item.icon, item.amount, item.title);
    if !item.lines.is_empty() {
        line.push_str(&format!(" {:?}", item.lines));
    }
    line
}

impl MenuHost for ConsoleHost {
    fn show(&mut self, viewer: &Viewer, view: MenuView) {
        self.print(&view);
        self.views.insert(viewer.id, view);
    }

    fn close_view(&mut self, viewer: ViewerId, handle: ViewHandle) {
        if self.views.get(&viewer).is_some_and(|v| v.handle == handle) {
            self.views.remove(&viewer);
            self.placed.retain(|(h, _), _| *h != handle);
            println!("== closed ==");
        }
    }

    fn play_sound(&mut self, _viewer: ViewerId, sound: &ButtonSound) {
        println!("[sound] {}", sound.name);
    }

    fn send_message(&mut self, _viewer: ViewerId, message: &str) {
        println!("[chat] {message}");
    }

    fn item_at(&self, handle: ViewHandle, slot: usize) -> Option<ItemView> {
        if let Some(item) = self.placed.get(&(handle, slot)) {
            return Some(item.clone());
        }
        self.views
            .values()
            .find(|v| v.handle == handle)
            .and_then(|v| v.slots.get(slot).cloned().flatten())
    }
}

// ─── Commands ────────────────────────────────────────────────────────────────

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("missing argument: {0}")]
    MissingArgument(&'static str),
    #[error("not a number: {0}")]
    InvalidNumber(String),
    #[error("unknown click kind: {0}")]
    UnknownClick(String),
}

/// One line typed at the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    List,
    Open { menu: usize, page: isize },
    Click { slot: usize, raw: RawAction, own_inventory: bool },
    Place { slot: usize, icon: String, amount: u8 },
    Drag,
    Close,
    Quit,
    Op,
    Exit,
}

fn number<T: FromStr>(arg: Option<&str>, name: &'static str) -> Result<T, CommandError> {
    let arg = arg.ok_or(CommandError::MissingArgument(name))?;
    arg.parse()
        .map_err(|_| CommandError::InvalidNumber(arg.to_string()))
}

fn click_kind(name: Option<&str>) -> Result<RawAction, CommandError> {
    Ok(match name.unwrap_or("left") {
        "left" => RawAction::PickupAll,
        "right" => RawAction::PickupHalf,
        "shift" => RawAction::MoveToOtherInventory,
        "wheel" => RawAction::CloneStack,
        "place" => RawAction::PlaceAll,
        "place-one" => RawAction::PlaceOne,
        "swap" => RawAction::SwapWithCursor,
        "hotbar" => RawAction::HotbarSwap,
        "drop" => RawAction::DropOneSlot,
        "collect" => RawAction::CollectToCursor,
        other => return Err(CommandError::UnknownClick(other.to_string())),
    })
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut args = line.split_whitespace();
        let Some(name) = args.next() else {
            return Err(CommandError::Unknown(String::new()));
        };
        Ok(match name {
            "help" => Command::Help,
            "list" => Command::List,
            "open" => Command::Open {
                menu: number(args.next(), "menu")?,
                page: args.next().map_or(Ok(0), |p| number(Some(p), "page"))?,
            },
            "click" | "own" => Command::Click {
                slot: number(args.next(), "slot")?,
                raw: click_kind(args.next())?,
                own_inventory: name == "own",
            },
            "place" => Command::Place {
                slot: number(args.next(), "slot")?,
                icon: args
                    .next()
                    .ok_or(CommandError::MissingArgument("icon"))?
                    .to_string(),
                amount: args.next().map_or(Ok(1), |a| number(Some(a), "amount"))?,
            },
            "drag" => Command::Drag,
            "close" => Command::Close,
            "quit" => Command::Quit,
            "op" => Command::Op,
            "exit" | "stop" => Command::Exit,
            other => return Err(CommandError::Unknown(other.to_string())),
        })
    }
}

const HELP: &str = "\
commands:
  list                          registered sample menus
  open <n> [page]               open sample n (negative pages count from the end)
  click <slot> [kind]           click a menu slot (left, right, shift, wheel, place, ...)
  own <slot> [kind]             click your own inventory
  place <slot> <icon> [amount]  put an item into a menu slot
  drag                          drag across the menu
  close                         close the open menu
  quit                          leave the server (drops every session)
  op                            toggle operator status
  exit                          stop the demo";

// ─── Session ─────────────────────────────────────────────────────────────────

/// The demo state driven by console commands.
pub struct Console {
    pub manager: MenuManager,
    pub host: ConsoleHost,
    pub viewer: Viewer,
    samples: Vec<(&'static str, MenuId)>,
}

impl Console {
    pub fn new(host: ConsoleHost, viewer: Viewer, samples: Vec<Sample>) -> Self {
        let mut manager = MenuManager::new();
        let samples = samples
            .into_iter()
            .map(|sample| (sample.name, manager.register(sample.menu)))
            .collect();
        Self {
            manager,
            host,
            viewer,
            samples,
        }
    }

    /// Parse and run one console line. Returns false once the demo should stop.
    pub fn handle_line(&mut self, line: &str) -> bool {
        match line.parse::<Command>() {
            Ok(command) => self.execute(command),
            Err(e) => {
                println!("{e} (try `help`)");
                true
            }
        }
    }

    pub fn execute(&mut self, command: Command) -> bool {
        match command {
            Command::Help => println!("{HELP}"),
            Command::List => {
                for (index, (name, id)) in self.samples.iter().enumerate() {
                    if let Some(menu) = self.manager.get(*id) {
                        println!(
                            "  {index:>2} {name:<16} {:?} {} slots, {} page(s)",
                            menu.kind(),
                            menu.size(),
                            menu.page_count()
                        );
                    }
                }
            }
            Command::Open { menu, page } => match self.samples.get(menu) {
                Some((_, id)) => {
                    if let Err(e) = self.manager.open_page(&mut self.host, *id, page, &self.viewer)
                    {
                        warn!("{e}");
                    }
                }
                None => println!("no sample menu {menu}"),
            },
            Command::Click {
                slot,
                raw,
                own_inventory,
            } => {
                let click = Click {
                    slot,
                    raw,
                    own_inventory,
                };
                let outcome = self.manager.handle_click(&mut self.host, &self.viewer, click);
                if !outcome.cancelled && raw.is_removal() && !own_inventory {
                    self.take_item(slot);
                }
                println!("click {}", if outcome.cancelled { "cancelled" } else { "allowed" });
            }
            Command::Place { slot, icon, amount } => self.place(slot, ItemView::new(icon, amount)),
            Command::Drag => {
                let outcome = self.manager.handle_drag(self.viewer.id);
                println!("drag {}", if outcome.cancelled { "cancelled" } else { "allowed" });
            }
            Command::Close => match self.host.view(self.viewer.id).map(|v| v.handle) {
                Some(handle) => {
                    self.host.close_view(self.viewer.id, handle);
                    self.manager.handle_close(&mut self.host, &self.viewer, handle);
                }
                None => println!("no menu open"),
            },
            Command::Quit => {
                let dropped = self.manager.handle_quit(&mut self.host, &self.viewer);
                self.host.views.remove(&self.viewer.id);
                info!("{} quit, {dropped} session(s) dropped", self.viewer.name);
            }
            Command::Op => {
                self.viewer.operator = !self.viewer.operator;
                println!("operator: {}", self.viewer.operator);
            }
            Command::Exit => return false,
        }
        true
    }

    /// Run queued move confirmations, as the host does once per tick.
    pub fn tick(&mut self) {
        let ran = self.manager.flush_deferred(&mut self.host);
        if ran > 0 {
            debug!("Ran {ran} move listener(s)");
        }
    }

    fn place(&mut self, slot: usize, item: ItemView) {
        let Some(handle) = self.host.view(self.viewer.id).map(|v| v.handle) else {
            println!("no menu open");
            return;
        };
        self.host.place(handle, slot, item);
        let click = Click::new(slot, RawAction::PlaceAll);
        let outcome = self.manager.handle_click(&mut self.host, &self.viewer, click);
        if outcome.cancelled {
            self.host.take(handle, slot);
            println!("place cancelled");
        } else {
            println!("placed");
        }
    }

    fn take_item(&mut self, slot: usize) {
        if let Some(handle) = self.host.view(self.viewer.id).map(|v| v.handle) {
            if let Some(item) = self.host.take(handle, slot) {
                println!("took {}", describe(&item));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::samples;
    use mc_rs_gui::{InventoryLayout, NavigationStyle};

    fn console() -> Console {
        let samples = samples(&NavigationStyle::default()).unwrap();
        Console::new(ConsoleHost::new(false), Viewer::new(1, "Steve"), samples)
    }

    fn index_of(console: &Console, name: &str) -> usize {
        console.samples.iter().position(|(n, _)| *n == name).unwrap()
    }

    #[test]
    fn parse_commands() {
        assert_eq!(
            "open 3".parse::<Command>(),
            Ok(Command::Open { menu: 3, page: 0 })
        );
        assert_eq!(
            "open 1 -1".parse::<Command>(),
            Ok(Command::Open { menu: 1, page: -1 })
        );
        assert_eq!(
            "own 4 shift".parse::<Command>(),
            Ok(Command::Click {
                slot: 4,
                raw: RawAction::MoveToOtherInventory,
                own_inventory: true
            })
        );
        assert_eq!(
            "place 2 minecraft:stone".parse::<Command>(),
            Ok(Command::Place {
                slot: 2,
                icon: "minecraft:stone".into(),
                amount: 1
            })
        );
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            "open".parse::<Command>(),
            Err(CommandError::MissingArgument("menu"))
        );
        assert_eq!(
            "click x".parse::<Command>(),
            Err(CommandError::InvalidNumber("x".into()))
        );
        assert_eq!(
            "click 1 sideways".parse::<Command>(),
            Err(CommandError::UnknownClick("sideways".into()))
        );
        assert_eq!(
            "fly".parse::<Command>(),
            Err(CommandError::Unknown("fly".into()))
        );
    }

    #[test]
    fn open_and_turn_pages() {
        let mut console = console();
        let menu = index_of(&console, "pagination");
        assert!(console.handle_line(&format!("open {menu}")));
        assert_eq!(console.host.view(ViewerId(1)).unwrap().page, 0);

        // Center navigation on a one-row menu puts "next" at slot 8.
        console.handle_line("click 8");
        let view = console.host.view(ViewerId(1)).unwrap();
        assert_eq!(view.page, 1);
        assert_eq!(view.title, "This is a title for page 1");
    }

    #[test]
    fn close_ends_the_session() {
        let mut console = console();
        let menu = index_of(&console, "status");
        console.handle_line(&format!("open {menu}"));
        console.handle_line("close");
        assert!(console.host.view(ViewerId(1)).is_none());
        assert!(console.manager.viewing(ViewerId(1)).is_none());
    }

    #[test]
    fn placed_items_are_confirmed_on_tick() {
        let mut console = console();
        let menu = index_of(&console, "dropbox");
        console.handle_line(&format!("open {menu}"));
        console.handle_line("place 3 minecraft:stone 5");
        assert_eq!(console.manager.pending_moves(), 1);

        console.tick();
        assert_eq!(console.manager.pending_moves(), 0);
        let id = console.manager.viewing(ViewerId(1)).unwrap();
        let button = console.manager.get(id).unwrap().layout().button(3).unwrap();
        assert_eq!(button.icon(), "minecraft:stone");
        assert_eq!(button.amount(), 5);
    }

    #[test]
    fn operators_get_a_contextualized_copy() {
        let mut console = console();
        let menu = index_of(&console, "context");
        console.handle_line("op");
        console.handle_line(&format!("open {menu}"));
        let view = console.host.view(ViewerId(1)).unwrap();
        assert!(view.title.ends_with("(OP)"));

        let registered = console.manager.len();
        console.handle_line("close");
        assert_eq!(console.manager.len(), registered - 1);
    }

    #[test]
    fn exit_stops() {
        let mut console = console();
        assert!(console.handle_line("list"));
        assert!(console.handle_line("nonsense"));
        assert!(!console.handle_line("exit"));
    }
}
