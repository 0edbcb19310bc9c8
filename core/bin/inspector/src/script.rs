use std::{error::Error, fmt::Display};

use clap_num::maybe_hex;
use famicore_mmu::Mmu;

/// Executes one script line against the MMU, returning the output to print
/// for commands that produce any. Blank lines and `#` comments do nothing.
///
/// Addresses and values accept decimal or `0x` hex.
pub fn execute_line(mmu: &mut Mmu, line: &str) -> Result<Option<String>, Box<dyn Error>> {
    if line.trim().is_empty() || line.trim_start().starts_with('#') {
        return Ok(None)
    }

    let words = shell_words::split(line)?;
    let [command, args @ ..] = &words[..] else {
        return Ok(None)
    };

    match command.as_str() {
        "mem.read.byte" => {
            let [addr] = args else {
                return Err(Box::new(CommandError::new("usage: mem.read.byte <addr>".to_string())));
            };
            let value = mmu.read_byte(maybe_hex(addr)?)?;
            Ok(Some(format!("{value:0>2X}")))
        }

        "mem.read.word" => {
            let [addr] = args else {
                return Err(Box::new(CommandError::new("usage: mem.read.word <addr>".to_string())));
            };
            let value = mmu.read_word(maybe_hex(addr)?)?;
            Ok(Some(format!("{value:0>4X}")))
        }

        "mem.write.byte" => {
            let [addr, value] = args else {
                return Err(Box::new(CommandError::new("usage: mem.write.byte <addr> <value>".to_string())));
            };
            mmu.write_byte(maybe_hex(addr)?, maybe_hex(value)?)?;
            Ok(None)
        }

        "mem.write.word" => {
            let [addr, value] = args else {
                return Err(Box::new(CommandError::new("usage: mem.write.word <addr> <value>".to_string())));
            };
            mmu.write_word(maybe_hex(addr)?, maybe_hex(value)?)?;
            Ok(None)
        }

        "mem.bank" => {
            let [addr] = args else {
                return Err(Box::new(CommandError::new("usage: mem.bank <addr>".to_string())));
            };
            match mmu.get_mem_bank(maybe_hex(addr)?) {
                Some(_) => Ok(Some("mapped".to_string())),
                None => Ok(Some("unmapped".to_string())),
            }
        }

        _ => Err(Box::new(CommandError::new(format!("unknown command: {command}")))),
    }
}

#[derive(Clone, Debug)]
pub struct CommandError(String);
impl CommandError {
    pub fn new(error: String) -> Self {
        Self(error)
    }
}
impl Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl Error for CommandError {}
