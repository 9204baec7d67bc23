//! Sample menus exercising every layout and listener kind.

use mc_rs_gui::{
    Button, Contextualized, GuiError, Menu, NavigationPosition, NavigationStyle, StatusModifier,
};

/// A named sample menu.
pub struct Sample {
    pub name: &'static str,
    pub menu: Menu,
}

/// Build every sample, paginated ones using `style` for their navigation row.
pub fn samples(style: &NavigationStyle) -> Result<Vec<Sample>, GuiError> {
    let styled = |position| NavigationStyle {
        position,
        ..style.clone()
    };
    Ok(vec![
        sample("flow", flow_menu()?),
        sample("pagination", pagination_menu(styled(NavigationPosition::Center))?),
        sample("centered", centered_menu()?),
        sample("overloaded", overloaded_menu()?),
        sample("context", context_menu()?),
        sample(
            "context-pages",
            context_pages_menu(styled(NavigationPosition::Bottom))?,
        ),
        sample("centered-clear", centered_clear_menu()?),
        sample("paginated-clear", paginated_clear_menu(styled(NavigationPosition::Center))?),
        sample("status", status_menu()?),
        sample("failing", failing_menu()?),
        sample("dropbox", dropbox_menu()?),
    ])
}

fn sample(name: &'static str, menu: Menu) -> Sample {
    Sample { name, menu }
}

fn diamond(title: String) -> Button {
    Button::with_icon("minecraft:diamond", title)
}

fn flow_menu() -> Result<Menu, GuiError> {
    let mut menu = Menu::flow("Title", 9)?;
    menu.add(Button::new("Test"));
    menu.add(
        Button::builder()
            .icon("minecraft:red_mushroom")
            .title("§2Test")
            .lines(["Lore1", "Lore2"])
            .sound("random.orb")
            .on_interact(|event| {
                let message = format!("You clicked with {:?}", event.action());
                event.send_message(message);
                Ok(())
            })
            .build(),
    );
    Ok(menu)
}

fn pagination_menu(style: NavigationStyle) -> Result<Menu, GuiError> {
    let mut menu = Menu::paginated("§4Subsidiary title / pagination Test", 9, style)?;
    menu.add(
        Button::builder()
            .icon("minecraft:minecart")
            .title("Multiline\ntitle")
            .lines(["first line", "second line"])
            .build(),
    );
    menu.add(
        Button::builder()
            .icon("minecraft:clock")
            .title("Take me")
            .lines(["This one is stealable"])
            .stealable(true)
            .build(),
    );
    let slots = (3..8).map(|slot| (0, slot)).chain((1..8).map(|slot| (1, slot)));
    for (page, slot) in slots {
        menu.add(diamond(format!("Page {page} - Slot {slot}")));
    }
    menu.set_page_title(1, "This is a title for page 1")?;
    Ok(menu)
}

fn centered_menu() -> Result<Menu, GuiError> {
    let mut menu = Menu::centered("§4Centered GUI Test", 18)?;
    let labels = (0..9).map(|i| format!("0-{i}")).chain((0..4).map(|i| format!("1-{i}")));
    for label in labels {
        menu.add(Button::new(label));
    }
    Ok(menu)
}

fn overloaded_menu() -> Result<Menu, GuiError> {
    let mut menu = Menu::centered("§6Overloaded centered GUI Test", 9)?;
    for _ in 0..13 {
        menu.add(Button::new("Test"));
    }
    Ok(menu)
}

fn context_menu() -> Result<Menu, GuiError> {
    let mut menu = Menu::flow("§9Context Modifier Test", 9)?;
    menu.add_context_modifier(|menu, viewer| {
        if viewer.operator {
            let title = format!("{} §c(OP)", menu.title());
            menu.set_title(title);
        }
    });
    menu.add(
        Button::builder()
            .title("Are you an operator?")
            .context_modifier(|button, viewer| {
                let answer = if viewer.operator { "§aYes" } else { "§cNo" };
                button.set_lines(vec![format!("{answer}, {}", viewer.name)]);
            })
            .build(),
    );
    Ok(menu)
}

fn context_pages_menu(style: NavigationStyle) -> Result<Menu, GuiError> {
    let mut menu = Menu::paginated("§9Context Modifier + Pagination Test", 45, style)?;
    for page in 0..3 {
        for item in 0..43 {
            menu.add(diamond(format!("Page {page} - Item {item}")));
        }
    }
    menu.add(
        Button::builder()
            .icon("minecraft:nether_star")
            .title("Last page")
            .context_modifier(|button, viewer| {
                if viewer.operator {
                    button.set_icon("minecraft:command_block");
                }
            })
            .build(),
    );
    menu.add_context_modifier(|menu, viewer| {
        if viewer.operator {
            // Operators get their own first page title; other pages keep the menu title.
            let _ = menu.set_page_title(0, format!("§cOperator view of {}", viewer.name));
        }
    });
    Ok(menu)
}

fn centered_clear_menu() -> Result<Menu, GuiError> {
    let mut menu = Menu::centered("§9SingleInventoryGUI Clear Test", 9)?;
    menu.add(Button::new("3"));
    menu.add(Button::new("5"));
    menu.clear();
    menu.add(Button::new("4"));
    Ok(menu)
}

fn paginated_clear_menu(style: NavigationStyle) -> Result<Menu, GuiError> {
    let mut menu = Menu::paginated("§9PaginatedInventoryGUI Clear Test", 27, style)?;
    for i in 0..100 {
        menu.add(Button::new(i.to_string()));
    }
    menu.clear();
    menu.add(Button::new("0"));
    Ok(menu)
}

fn status_menu() -> Result<Menu, GuiError> {
    let mut menu = Menu::flow("§6CloseListener / StatusModifier Test", 9)?;
    menu.set_close_listener(|event| {
        event.send_message("You closed the GUI!");
        Ok(())
    });
    menu.set_status(StatusModifier::with_value("SM1 (String)", "A string value"));
    menu.set_status(StatusModifier::flag("SM2 (null)"));
    menu.set_status(StatusModifier::with_value("SM3 (Number)", 42));

    let mut statuses: Vec<StatusModifier> = menu.status_modifiers().iter().cloned().collect();
    statuses.sort_by(|a, b| a.key.cmp(&b.key));
    for status in statuses {
        let value = status
            .value
            .as_ref()
            .map_or_else(|| "null".to_string(), |v| v.to_string());
        menu.add(
            Button::builder()
                .icon("minecraft:name_tag")
                .title(status.key)
                .lines([value])
                .build(),
        );
    }
    Ok(menu)
}

fn failing_menu() -> Result<Menu, GuiError> {
    let mut menu = Menu::flow("§cListener failure Test", 9)?;
    menu.add(
        Button::builder()
            .icon("minecraft:anvil")
            .title("Click (error)")
            .on_interact(|_| Err("this listener always fails".into()))
            .build(),
    );
    menu.add(
        Button::builder()
            .icon("minecraft:anvil")
            .title("Click (panic)")
            .on_interact(|_| panic!("this listener always panics"))
            .build(),
    );
    Ok(menu)
}

fn dropbox_menu() -> Result<Menu, GuiError> {
    let mut menu = Menu::flow("§2Drop Box", 9)?;
    menu.set_move_listener(|event| {
        if let Some(id) = event.confirm_as_button() {
            let message = format!("Kept your item in slot {} as {id:?}", event.slot());
            event.send_message(message);
        }
        Ok(())
    });
    Ok(menu)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mc_rs_gui::{InventoryLayout, MenuKind};

    fn all() -> Vec<Sample> {
        samples(&NavigationStyle::default()).unwrap()
    }

    fn find(name: &str) -> Menu {
        all().into_iter().find(|s| s.name == name).unwrap().menu
    }

    #[test]
    fn names_are_unique() {
        let samples = all();
        let mut names: Vec<_> = samples.iter().map(|s| s.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), samples.len());
    }

    #[test]
    fn pagination_sample_spans_two_pages() {
        let menu = find("pagination");
        assert_eq!(menu.kind(), MenuKind::Paginated);
        assert_eq!(menu.page_count(), 2);
        assert_eq!(
            menu.layout().button_on_page(1, 3).unwrap().title(),
            "Page 1 - Slot 3"
        );
        assert_eq!(menu.page_title(1), "This is a title for page 1");
        assert!(menu.layout().button(2).unwrap().is_stealable());
    }

    #[test]
    fn overloaded_centered_stays_full() {
        let menu = find("overloaded");
        assert!(!menu.has_space_left());
        assert_eq!(menu.layout().page(0).unwrap().count(), 9);
    }

    #[test]
    fn clear_samples_keep_only_the_last_add() {
        let menu = find("centered-clear");
        assert_eq!(menu.layout().button(4).unwrap().title(), "4");
        assert_eq!(menu.layout().page(0).unwrap().count(), 1);

        let menu = find("paginated-clear");
        assert_eq!(menu.page_count(), 1);
        assert!(menu.layout().button(0).is_some());
    }

    #[test]
    fn context_pages_sample_has_three_full_pages_and_one_more() {
        let menu = find("context-pages");
        assert_eq!(menu.page_count(), 4);
        assert!(!menu.context_modifiers().is_empty());
    }

    #[test]
    fn status_sample_lists_its_statuses() {
        let menu = find("status");
        assert!(menu.has_status("SM2 (null)"));
        assert_eq!(menu.layout().page(0).unwrap().count(), 3);
        assert!(menu.close_listener().is_some());
    }
}
