use crate::discord::{Data, Error};

mod fun;
mod help;
mod info;
mod media;
mod owner;

/// All available discord commands.
pub fn list() -> Vec<poise::Command<Data, Error>> {
    vec![
        help::help(),
        info::about(),
        info::status(),
        info::modding(),
        fun::kermit(),
        fun::letters(),
        fun::praise(),
        fun::platy(),
        media::sus(),
        media::har(),
        media::piston(),
        owner::quit(),
        owner::del(),
    ]
}
