/// Canned replies sent through the Messenger Send API

pub const HELP_MESSAGE: &str =
    "Help: ask for a Joke and then you will want some More. Type Reset if you get stuck.";

pub const HINT_MESSAGE: &str = "Hint: ask for help to get instructions.";

pub const ATTACHMENT_ACK: &str =
    "Nice picture, do you want to know what Chuck Norris has to say about it?";
