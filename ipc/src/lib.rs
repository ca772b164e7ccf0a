// This crate centralizes the wire definitions of the chat channel.

pub mod chat_messages; // Browser/CLI client <-> chat namespace
