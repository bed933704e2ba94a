use divan::{Bencher, black_box};
use tapestry::{AttributeName, ElementName, Recorder, RenderOptions, render_to_string};

fn main() {
    divan::main();
}

/// Records a page with `rows` table rows.
fn record_page(rec: &mut Recorder<'static>, rows: usize) {
    rec.doctype().unwrap();
    let title = rec.element_text(ElementName::Title, "Report").unwrap();
    let head = rec.element(ElementName::Head, [title]).unwrap();

    let mut trs = Vec::with_capacity(rows);
    for i in 0..rows {
        let class = rec
            .attribute(AttributeName::Class, Some(if i % 2 == 0 { "even" } else { "odd" }.into()))
            .unwrap();
        let name = rec.element_text(ElementName::Td, format!("row {i}")).unwrap();
        let href = rec
            .attribute(AttributeName::Href, Some(format!("/rows/{i}.html").into()))
            .unwrap();
        let link = rec.text("open").unwrap();
        let a = rec.element(ElementName::A, [href, link]).unwrap();
        let cell = rec.element(ElementName::Td, [a]).unwrap();
        trs.push(rec.element(ElementName::Tr, [class, name, cell]).unwrap());
    }
    let table = rec.element(ElementName::Table, trs).unwrap();
    let body = rec.element(ElementName::Body, [table]).unwrap();
    let _ = rec.element(ElementName::Html, [head, body]).unwrap();
}

#[divan::bench(args = [10, 100, 1000])]
fn record(bencher: Bencher, rows: usize) {
    let mut rec = Recorder::new();
    bencher.bench_local(|| {
        rec.reset();
        record_page(black_box(&mut rec), rows);
    });
}

#[divan::bench(args = [10, 100, 1000])]
fn render(bencher: Bencher, rows: usize) {
    let mut rec = Recorder::new();
    record_page(&mut rec, rows);
    let options = RenderOptions::new().with_base_path("/rows/index.html");
    bencher.bench_local(|| {
        let mut doc = rec.compile().unwrap();
        let html = render_to_string(black_box(&mut doc), &options).unwrap();
        black_box(html);
    });
}
