pub mod error;

use arch::mem::MEMORY_SIZE;
use arch::op::Op;
use error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Code,
    Data,
}

/// Encode two-section assembly text into the flat 256-byte memory image.
/// `.CODE` mnemonics land sequentially from byte 0 (opcode byte, then the
/// raw address byte for operand-bearing ops); `.DATA` pairs poke values at
/// absolute addresses. `;` starts a comment.
pub fn assemble(text: &str) -> Result<Vec<u8>, Error> {
    let mut image = vec![0u8; MEMORY_SIZE];
    let mut section: Option<Section> = None;
    let mut cursor = 0usize;

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let code = match raw.find(';') {
            Some(pos) => &raw[..pos],
            None => raw,
        };
        let words: Vec<&str> = code.split_whitespace().collect();
        let Some((&head, rest)) = words.split_first() else {
            continue;
        };

        match head {
            ".CODE" => {
                section = Some(Section::Code);
                continue;
            }
            ".DATA" => {
                section = Some(Section::Data);
                continue;
            }
            _ => {}
        }

        match section {
            Some(Section::Code) => {
                let op = Op::parse(head).map_err(|_| Error::UnknownMnemonic {
                    text: head.to_string(),
                    line,
                })?;
                if cursor + op.size() > MEMORY_SIZE {
                    return Err(Error::ImageOverflow { line });
                }
                image[cursor] = op.into();
                cursor += 1;
                if op.has_operand() {
                    let Some(&operand) = rest.first() else {
                        return Err(Error::MissingOperand {
                            mnemonic: head.to_string(),
                            line,
                        });
                    };
                    image[cursor] = parse_byte(operand, line)?;
                    cursor += 1;
                } else if !rest.is_empty() {
                    return Err(Error::UnexpectedOperand {
                        mnemonic: head.to_string(),
                        line,
                    });
                }
            }
            Some(Section::Data) => {
                let (&value, _) = rest.split_first().ok_or_else(|| Error::InvalidData {
                    text: code.trim().to_string(),
                    line,
                })?;
                let addr = parse_byte(head, line)?;
                image[addr as usize] = parse_byte(value, line)?;
            }
            None => return Err(Error::OutsideSection { line }),
        }
    }
    Ok(image)
}

/// Numbers are hexadecimal with a `0x` prefix, decimal otherwise.
fn parse_byte(s: &str, line: usize) -> Result<u8, Error> {
    let value = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse::<u32>(),
    }
    .map_err(|_| Error::InvalidNumber {
        text: s.to_string(),
        line,
    })?;
    if value > 0xFF {
        return Err(Error::ValueOutOfRange { value, line });
    }
    Ok(value as u8)
}
