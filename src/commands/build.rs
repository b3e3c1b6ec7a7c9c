//! Build the site once

use crate::content::Posts;
use crate::error::Result;
use crate::generator::Generator;
use crate::templates::TemplateRenderer;
use crate::Site;

/// Generate the static site
pub fn run(site: &Site) -> Result<Posts> {
    let start = std::time::Instant::now();

    let renderer = TemplateRenderer::load(&site.template_dir)?;
    let generator = Generator::new(&site.config, renderer, &site.source_dir, &site.public_dir);
    let posts = generator.generate()?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(posts)
}
