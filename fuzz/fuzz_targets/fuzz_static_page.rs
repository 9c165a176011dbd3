#![no_main]
use libfuzzer_sys::fuzz_target;
use orpets::config::types::PageLayout;
use orpets::ports::page::Page;

fuzz_target!(|data: &[u8]| {
    if let Ok(html) = std::str::from_utf8(data) {
        let base = url::Url::parse("https://example.com/search").ok();
        if let Ok(page) =
            orpets::adapters::page::static_page::StaticPage::parse(html, base.as_ref(), &PageLayout::default())
        {
            for i in 0..page.listing_count() {
                page.append_pet_list(i, "<li>fuzz</li>");
            }
            let _ = page.render();
        }
    }
});
