//! Generator module - builds the site from posts, templates and config

use std::path::PathBuf;

use crate::config::SiteConfig;
use crate::content::{Post, PostLoader, Posts, User};
use crate::error::{Error, Result};
use crate::feed::FeedWriter;
use crate::templates::{ListPage, PostPage, TemplateRenderer};

/// One build of a site: posts from `src`, templates from a loaded set,
/// output into `dst`
pub struct Generator<'a> {
    config: &'a SiteConfig,
    renderer: TemplateRenderer,
    src: PathBuf,
    dst: PathBuf,
}

impl<'a> Generator<'a> {
    pub fn new(
        config: &'a SiteConfig,
        renderer: TemplateRenderer,
        src: impl Into<PathBuf>,
        dst: impl Into<PathBuf>,
    ) -> Self {
        Self {
            config,
            renderer,
            src: src.into(),
            dst: dst.into(),
        }
    }

    /// Generate the entire site
    pub fn generate(&self) -> Result<Posts> {
        tracing::info!(
            "Generating static html from {} to {}",
            self.src.display(),
            self.dst.display()
        );

        let loader = PostLoader::new(&self.config.posts_dir);
        let posts = loader.load_posts(&self.src)?;
        for post in posts.iter() {
            self.generate_post_page(post)?;
        }

        let newest = posts.newest().ok_or_else(|| Error::NoPosts(self.src.clone()))?;

        self.generate_list_page("index.html", "", posts.as_slice(), &newest.author)?;
        self.generate_list_page("about.html", "About", &[], &newest.author)?;
        self.generate_list_page("contact.html", "Contact", &[], &newest.author)?;
        self.generate_list_page(
            "archive.html",
            "Archive",
            archived(&posts, self.config.archive_skip),
            &newest.author,
        )?;

        let feeds = FeedWriter::new(self.config);
        feeds.write_atom(&posts, &self.dst)?;
        feeds.write_rss(&posts, &self.dst)?;

        tracing::info!("Generated {} posts", posts.len());
        Ok(posts)
    }

    /// Render `default.html` for a post at the path its URL names
    fn generate_post_page(&self, post: &Post) -> Result<()> {
        let dst = self.dst.join(post.url.trim_start_matches('/'));
        self.renderer
            .render_to(&dst, "default.html", &PostPage { content: post })
    }

    /// Render one of the listing templates to a file of the same name
    fn generate_list_page(
        &self,
        template: &str,
        title: &str,
        posts: &[Post],
        author: &User,
    ) -> Result<()> {
        let dst = self.dst.join(template);
        self.renderer.render_to(
            &dst,
            template,
            &ListPage {
                title,
                posts,
                author,
            },
        )
    }
}

/// Posts shown on the archive page: all of them while there are fewer than
/// `skip`, otherwise everything but the `skip` newest
pub fn archived(posts: &Posts, skip: usize) -> &[Post] {
    let posts = posts.as_slice();
    if posts.len() < skip {
        posts
    } else {
        &posts[skip..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    const THEME_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/theme");

    const DATES: [&str; 6] = [
        "Mon, 02 Jan 2006 15:04:05 GMT",
        "Tue, 10 Oct 2017 08:00:00 GMT",
        "Fri, 01 Jan 2010 00:00:00 GMT",
        "Sat, 05 May 2012 12:00:00 GMT",
        "Wed, 15 Jul 2015 09:30:00 +0200",
        "Thu, 01 Mar 2018 18:45:00 MST",
    ];

    fn write_posts(src: &Path, count: usize) {
        for (i, date) in DATES.iter().take(count).enumerate() {
            let content = format!(
                "author: Jane Doe <jane@example.com>\ntitle: Post {i}\ndate: {date}\ntags: rust, blog\ndescription: Number {i}\n\n# Heading {i}\n\nBody of *post {i}*.\n"
            );
            fs::write(src.join(format!("post-{i}.md")), content).unwrap();
        }
    }

    fn post_titles(posts: &[Post]) -> Vec<&str> {
        posts.iter().map(|p| p.title.as_str()).collect()
    }

    #[test]
    fn test_archived() {
        let posts = |n: usize| Posts::from(vec![Post::default(); n]);
        assert_eq!(archived(&posts(3), 5).len(), 3);
        assert_eq!(archived(&posts(5), 5).len(), 0);
        assert_eq!(archived(&posts(6), 5).len(), 1);
        assert_eq!(archived(&posts(0), 5).len(), 0);
    }

    #[test]
    fn test_generate_site_end_to_end() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        write_posts(src.path(), 6);

        let config = SiteConfig::default();
        let renderer = TemplateRenderer::load(Path::new(THEME_DIR)).unwrap();
        let generator = Generator::new(&config, renderer, src.path(), dst.path());
        let posts = generator.generate().unwrap();

        assert_eq!(
            post_titles(posts.as_slice()),
            vec!["Post 5", "Post 1", "Post 4", "Post 3", "Post 2", "Post 0"]
        );

        for i in 0..6 {
            let page = dst.path().join("posts").join(format!("post-{i}.html"));
            let html = fs::read_to_string(&page).unwrap();
            assert!(html.contains(&format!("Post {i}")));
            assert!(html.contains(&format!("<em>post {i}</em>")));
        }

        for page in ["index.html", "about.html", "contact.html"] {
            assert!(dst.path().join(page).is_file(), "{page} missing");
        }

        let about = fs::read_to_string(dst.path().join("about.html")).unwrap();
        assert!(about.contains("jane@example.com"));

        let archive = fs::read_to_string(dst.path().join("archive.html")).unwrap();
        assert_eq!(archive.matches("class=\"post-link\"").count(), 1);
        assert!(archive.contains("/posts/post-0.html"));

        let index = fs::read_to_string(dst.path().join("index.html")).unwrap();
        assert_eq!(index.matches("class=\"post-link\"").count(), 5);
        assert!(!index.contains("/posts/post-0.html"));

        let atom = fs::read_to_string(dst.path().join("atom.xml")).unwrap();
        assert_eq!(atom.matches("<entry>").count(), 6);
        let rss = fs::read_to_string(dst.path().join("rss.xml")).unwrap();
        assert_eq!(rss.matches("<item>").count(), 6);
    }

    #[test]
    fn test_generate_uses_loader_order() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        write_posts(src.path(), 4);

        let config = SiteConfig::default();
        let loaded = PostLoader::new(&config.posts_dir)
            .load_posts(src.path())
            .unwrap();
        let renderer = TemplateRenderer::load(Path::new(THEME_DIR)).unwrap();
        let generated = Generator::new(&config, renderer, src.path(), dst.path())
            .generate()
            .unwrap();

        assert_eq!(post_titles(generated.as_slice()), post_titles(loaded.as_slice()));
        for post in loaded.iter() {
            assert!(dst.path().join(post.url.trim_start_matches('/')).is_file());
        }
    }

    #[test]
    fn test_generate_few_posts_archives_everything() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        write_posts(src.path(), 2);

        let config = SiteConfig::default();
        let renderer = TemplateRenderer::load(Path::new(THEME_DIR)).unwrap();
        Generator::new(&config, renderer, src.path(), dst.path())
            .generate()
            .unwrap();

        let archive = fs::read_to_string(dst.path().join("archive.html")).unwrap();
        assert_eq!(archive.matches("class=\"post-link\"").count(), 2);
    }

    #[test]
    fn test_generate_empty_source_is_an_error() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();

        let config = SiteConfig::default();
        let renderer = TemplateRenderer::load(Path::new(THEME_DIR)).unwrap();
        let result = Generator::new(&config, renderer, src.path(), dst.path()).generate();
        assert!(matches!(result, Err(Error::NoPosts(_))));
    }

    #[test]
    fn test_generate_bad_date_stops_the_build() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        fs::write(src.path().join("bad.md"), "date: yesterday\n").unwrap();

        let config = SiteConfig::default();
        let renderer = TemplateRenderer::load(Path::new(THEME_DIR)).unwrap();
        let err = Generator::new(&config, renderer, src.path(), dst.path())
            .generate()
            .unwrap_err();
        assert!(err.to_string().contains("bad.md"));
    }
}
