//! Shared helpers: build small PDFs in memory for pipeline tests.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// One positioned text show: (text, font size, x, y, bold).
pub type Span<'a> = (&'a str, f32, f32, f32, bool);

/// Build a PDF with one page per span list. Fonts are Helvetica and
/// Helvetica-Bold; every span is positioned with an absolute `Tm`.
pub fn build_pdf(pages: &[Vec<Span>]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_regular = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let font_bold = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_regular,
            "F2" => font_bold,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for spans in pages {
        let mut ops = vec![Operation::new("BT", vec![])];
        for &(text, size, x, y, bold) in spans {
            let font = if bold { "F2" } else { "F1" };
            ops.push(Operation::new(
                "Tf",
                vec![Object::Name(font.into()), Object::Real(size)],
            ));
            ops.push(Operation::new(
                "Tm",
                vec![
                    Object::Real(1.0),
                    Object::Real(0.0),
                    Object::Real(0.0),
                    Object::Real(1.0),
                    Object::Real(x),
                    Object::Real(y),
                ],
            ));
            ops.push(Operation::new("Tj", vec![Object::string_literal(text)]));
        }
        ops.push(Operation::new("ET", vec![]));

        let content = Content { operations: ops };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content stream"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(612),
                Object::Integer(792),
            ],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("serialize pdf");
    bytes
}

/// A realistic one-page resume with header, experience, education, and
/// skills sections.
pub fn sample_resume_pdf() -> Vec<u8> {
    build_pdf(&[resume_page()])
}

pub fn resume_page() -> Vec<Span<'static>> {
    vec![
        ("Jane Roe", 18.0, 50.0, 760.0, true),
        ("jane.roe@example.com | +1 (555) 123-4567", 10.0, 50.0, 742.0, false),
        ("Austin, TX", 10.0, 50.0, 728.0, false),
        ("EXPERIENCE", 14.0, 50.0, 704.0, true),
        ("Senior Engineer", 11.0, 50.0, 688.0, true),
        ("Acme Corp", 11.0, 50.0, 674.0, false),
        ("Jan 2020 - Present", 11.0, 50.0, 660.0, false),
        ("- Led migration of 40 services to Kubernetes", 11.0, 58.0, 646.0, false),
        ("- Reduced infrastructure costs by 30%", 11.0, 58.0, 632.0, false),
        ("Engineer", 11.0, 50.0, 616.0, true),
        ("Initech", 11.0, 50.0, 602.0, false),
        ("Jun 2016 - Dec 2019", 11.0, 50.0, 588.0, false),
        ("- Built CI pipelines with Docker", 11.0, 58.0, 574.0, false),
        ("- Automated deployments with Terraform", 11.0, 58.0, 560.0, false),
        ("EDUCATION", 14.0, 50.0, 536.0, true),
        ("State University", 11.0, 50.0, 520.0, false),
        ("BS Computer Science | 2012 - 2016", 11.0, 50.0, 506.0, false),
        ("SKILLS", 14.0, 50.0, 482.0, true),
        ("Python, Docker, Kubernetes, AWS, SQL, Terraform, Linux", 11.0, 50.0, 466.0, false),
    ]
}
