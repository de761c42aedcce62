//! In-memory PDF construction for tests.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// Build a minimal valid document with `num_pages` pages.
///
/// Each page carries a distinct MediaBox height (700 + index), so tests can
/// tell which source pages survived a selection.
pub fn sample_document(num_pages: u32) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for i in 0..num_pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new(
                    "Tf",
                    vec![Object::Name(b"F1".to_vec()), Object::Integer(12)],
                ),
                Operation::new("Td", vec![Object::Integer(72), Object::Integer(720)]),
                Operation::new(
                    "Tj",
                    vec![Object::string_literal(format!("Page {}", i + 1))],
                ),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode page content"),
        ));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                612.into(),
                Object::Integer(700 + i64::from(i)),
            ],
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => i64::from(num_pages),
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc
}

/// `sample_document` serialized to bytes, ready to write to disk.
pub fn sample_pdf_bytes(num_pages: u32) -> Vec<u8> {
    let mut buf = Vec::new();
    sample_document(num_pages)
        .save_to(&mut buf)
        .expect("serialize sample PDF");
    buf
}

/// MediaBox heights of every page, in page order.
pub fn page_heights(doc: &Document) -> Vec<i64> {
    doc.get_pages()
        .values()
        .map(|&page_id| {
            let dict = doc.get_dictionary(page_id).expect("page dictionary");
            let media_box = dict
                .get(b"MediaBox")
                .and_then(|obj| obj.as_array())
                .expect("MediaBox array");
            media_box[3].as_i64().expect("MediaBox height")
        })
        .collect()
}
