use crate::{
    history::{Message, Role},
    theme::{Palette, Theme},
};
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io::{self, Write};

pub const TITLE: &str = "FTC Decode Chatbot";
pub const SUBTITLE: &str = "Ask me anything about the FTC Game Manual for the 2025-2026 season!";
pub const PROMPT: &str = "> ";

const RULE_WIDTH: usize = 60;

/// Clears the screen and draws the header plus the whole conversation.
pub fn transcript<'a, W: Write>(
    out: &mut W,
    theme: Theme,
    messages: impl Iterator<Item = &'a Message>,
    busy: bool,
) -> io::Result<()> {
    let palette = theme.palette();
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    header(out, theme)?;

    let mut messages = messages.peekable();
    if messages.peek().is_none() {
        welcome(out, &palette)?;
    }
    for message in messages {
        self::message(out, message, &palette)?;
    }
    footer(out, &palette, busy)
}

pub fn header<W: Write>(out: &mut W, theme: Theme) -> io::Result<()> {
    let palette = theme.palette();
    queue!(
        out,
        SetAttribute(Attribute::Bold),
        SetForegroundColor(palette.text),
        Print(TITLE),
        SetAttribute(Attribute::Reset),
        SetForegroundColor(palette.muted),
        Print(format!("  [{theme} theme, /help for commands]\r\n")),
        Print(SUBTITLE),
        Print("\r\n"),
    )?;
    rule(out, &palette)
}

pub fn welcome<W: Write>(out: &mut W, palette: &Palette) -> io::Result<()> {
    queue!(
        out,
        Print("\r\n"),
        SetAttribute(Attribute::Bold),
        SetForegroundColor(palette.text),
        Print("Welcome!\r\n"),
        SetAttribute(Attribute::Reset),
        SetForegroundColor(palette.muted),
        Print("I'm here to help you find answers about the rules for the 2025-2026 FTC Decode season!\r\n"),
        Print("Start a conversation by typing a message below.\r\n\r\n"),
        ResetColor,
    )
}

/// One message: a `[HH:MM] You` label line, then the content.
pub fn message<W: Write>(out: &mut W, message: &Message, palette: &Palette) -> io::Result<()> {
    let (label, color) = match message.role() {
        Role::User => ("You", palette.user),
        Role::Assistant => ("Assistant", palette.assistant),
    };

    queue!(
        out,
        SetForegroundColor(palette.muted),
        Print(format!("[{}] ", message.display_time())),
        SetAttribute(Attribute::Bold),
        SetForegroundColor(color),
        Print(label),
        SetAttribute(Attribute::Reset),
        Print("\r\n"),
        SetForegroundColor(palette.text),
    )?;
    for line in message.content().lines() {
        queue!(out, Print("  "), Print(line), Print("\r\n"))?;
    }
    queue!(out, ResetColor, Print("\r\n"))
}

pub fn thinking<W: Write>(out: &mut W, palette: &Palette) -> io::Result<()> {
    queue!(
        out,
        SetForegroundColor(palette.loading),
        Print("  . . .  thinking\r\n"),
        ResetColor,
    )
}

pub fn prompt<W: Write>(out: &mut W, palette: &Palette) -> io::Result<()> {
    queue!(
        out,
        SetForegroundColor(palette.accent),
        Print(PROMPT),
        ResetColor,
    )
}

pub fn footer<W: Write>(out: &mut W, palette: &Palette, busy: bool) -> io::Result<()> {
    if busy {
        thinking(out, palette)
    } else {
        prompt(out, palette)
    }
}

pub fn help<W: Write>(out: &mut W, palette: &Palette) -> io::Result<()> {
    queue!(
        out,
        SetForegroundColor(palette.muted),
        Print("Commands:\r\n"),
        Print("  /theme   switch between light and dark\r\n"),
        Print("  /help    show this list\r\n"),
        Print("  /quit    leave the chat (also /exit or Ctrl-D)\r\n"),
        Print("Anything else is sent as a message.\r\n"),
        ResetColor,
    )
}

/// A one-line status note in the muted color.
pub fn notice<W: Write>(out: &mut W, palette: &Palette, text: &str) -> io::Result<()> {
    notice_in(out, palette.muted, text)
}

pub fn notice_in<W: Write>(out: &mut W, color: Color, text: &str) -> io::Result<()> {
    queue!(
        out,
        SetForegroundColor(color),
        Print(text),
        Print("\r\n"),
        ResetColor,
    )
}

fn rule<W: Write>(out: &mut W, palette: &Palette) -> io::Result<()> {
    queue!(
        out,
        SetForegroundColor(palette.border),
        Print("─".repeat(RULE_WIDTH)),
        Print("\r\n"),
        ResetColor,
    )
}
