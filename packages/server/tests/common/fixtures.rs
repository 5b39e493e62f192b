//! Documents and model responses used across the integration tests.

use std::io::Cursor;

use image::{ImageFormat, Rgb, RgbImage};

/// A clean model answer for every requested key.
pub const FULL_MODEL_RESPONSE: &str = r#"{"name":"Asha Rao","roll_no":"R-17","certificate_no":"CERT-0042","course":"B.Sc Physics","institution":"State University","month":"June","year":"2021","grade":"A+"}"#;

/// The same answer wrapped in chatter, as the model often returns it.
pub fn chatty_response(json: &str) -> String {
    format!("Sure! Here are the details I found:\n```json\n{}\n```\nLet me know if you need anything else.", json)
}

/// Model answer for a given student and certificate number.
pub fn model_response(name: &str, certificate_no: Option<&str>) -> String {
    serde_json::json!({
        "name": name,
        "roll_no": "R-1",
        "certificate_no": certificate_no,
        "course": "Course",
        "institution": "Institute",
        "month": "May",
        "year": "2020",
        "grade": "B",
    })
    .to_string()
}

fn encode(image: &RgbImage, format: ImageFormat) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, format)
        .expect("encode test image");
    out.into_inner()
}

/// Small PNG; `shade` varies the pixels so different shades hash differently.
pub fn png_bytes(shade: u8) -> Vec<u8> {
    encode(&RgbImage::from_pixel(8, 8, Rgb([shade, shade, 255])), ImageFormat::Png)
}

pub fn jpeg_bytes() -> Vec<u8> {
    encode(&RgbImage::from_pixel(8, 8, Rgb([200, 180, 40])), ImageFormat::Jpeg)
}

/// Minimal PDF-looking payload; the model never parses it in tests.
pub fn pdf_bytes(tag: &str) -> Vec<u8> {
    format!("%PDF-1.4\n% certificate {}\n%%EOF\n", tag).into_bytes()
}
