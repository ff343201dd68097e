/// Navigation requested by a key press or button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavCommand {
    Previous,
    Next,
}

#[inline]
pub fn nav_for_key(key: &str) -> Option<NavCommand> {
    match key {
        "ArrowLeft" => Some(NavCommand::Previous),
        "ArrowRight" => Some(NavCommand::Next),
        _ => None,
    }
}

/// Element ids of the optional previous/next buttons.
#[inline]
pub fn button_id(command: NavCommand) -> &'static str {
    match command {
        NavCommand::Previous => "carousel-prev",
        NavCommand::Next => "carousel-next",
    }
}
