//! Attribute parser for the XML block embedded in a secure container

use crate::error::{AadharError, Result};
use crate::xml::types::*;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

const ROOT_ELEMENT: &[u8] = b"OfflinePaperlessKyc";

/// Parse the `OfflinePaperlessKyc` attribute grammar into named fields.
///
/// Only attributes are read: `referenceId` on the root, personal fields on
/// `Poi` and address fields on `Poa`. Unknown elements and attributes are
/// skipped. Element text (photo, signature nodes of the ZIP variant) is
/// ignored because the container carries those outside the XML.
pub fn parse_kyc_attributes(xml: &[u8]) -> Result<KycAttributes> {
    log::debug!("Parsing KYC XML attributes, size: {} bytes", xml.len());

    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut attrs = KycAttributes::default();
    let mut seen_root = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                match e.local_name().as_ref() {
                    ROOT_ELEMENT => {
                        seen_root = true;
                        read_root(&e, &mut attrs)?;
                    }
                    b"Poi" => read_poi(&e, &mut attrs)?,
                    b"Poa" => read_poa(&e, &mut attrs.address)?,
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(AadharError::XmlParseError(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    if !seen_root {
        return Err(AadharError::MissingField(
            String::from_utf8_lossy(ROOT_ELEMENT).into_owned(),
        ));
    }

    Ok(attrs)
}

/// Iterate `(key, unescaped value)` pairs of an element.
fn for_each_attr(e: &BytesStart<'_>, mut apply: impl FnMut(&[u8], String)) -> Result<()> {
    for attr in e.attributes() {
        let attr = attr?;
        let value = attr.unescape_value()?.into_owned();
        apply(attr.key.local_name().as_ref(), value);
    }
    Ok(())
}

fn read_root(e: &BytesStart<'_>, attrs: &mut KycAttributes) -> Result<()> {
    for_each_attr(e, |key, value| {
        if key == b"referenceId" || key == b"reference_id" {
            attrs.reference_id = value;
        }
    })
}

fn read_poi(e: &BytesStart<'_>, attrs: &mut KycAttributes) -> Result<()> {
    for_each_attr(e, |key, value| match key {
        b"name" => attrs.name = value,
        b"dob" => attrs.dob = value,
        b"gender" => attrs.gender = value,
        b"phone" | b"m" => attrs.mobile = Some(value),
        b"email" | b"e" => attrs.email = Some(value),
        _ => {}
    })
}

fn read_poa(e: &BytesStart<'_>, poa: &mut AddressInfo) -> Result<()> {
    for_each_attr(e, |key, value| match key {
        b"co" | b"careof" => poa.care_of = Some(value),
        b"house" => poa.house = Some(value),
        b"street" | b"st" => poa.street = Some(value),
        b"lm" | b"landmark" => poa.landmark = Some(value),
        b"loc" | b"locality" => poa.locality = Some(value),
        b"vtc" => poa.vtc = Some(value),
        b"subdist" => poa.subdist = Some(value),
        b"dist" | b"district" => poa.district = Some(value),
        b"state" => poa.state = Some(value),
        b"pc" | b"pincode" => poa.pincode = Some(value),
        b"po" => poa.post_office = Some(value),
        _ => {}
    })
}
