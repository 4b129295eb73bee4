/// Set of commands which the trivia server can receive from a player
pub mod command;
/// Set of events the trivia server pushes to a player, alongside the payload types they carry
pub mod event;
/// Implementation of event and command transportation over TCP Streams.
/// Requires 'server' or 'client' features to be enabled and will bring in tokio dependency alongside with other dependencies
pub mod transport;
