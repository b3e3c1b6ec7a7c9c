//! Atom and RSS feeds built from the post list

use atom_syndication as atom;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::config::SiteConfig;
use crate::content::{Post, Posts};
use crate::error::{Error, Result};

/// Writes the site feeds. Items are in post order, one per post, each with
/// the full rendered body.
pub struct FeedWriter<'a> {
    config: &'a SiteConfig,
}

impl<'a> FeedWriter<'a> {
    pub fn new(config: &'a SiteConfig) -> Self {
        Self { config }
    }

    /// Absolute link for a site-relative URL
    pub fn link_for(&self, url: &str) -> String {
        format!("{}{}", self.config.link.trim_end_matches('/'), url)
    }

    /// `email (Name)`, the RSS form of a person
    fn rss_person(&self, name: &str) -> Option<String> {
        let email = &self.config.author.email;
        match (email.is_empty(), name.trim().is_empty()) {
            (true, true) => None,
            (true, false) => Some(name.trim().to_string()),
            (false, true) => Some(email.clone()),
            (false, false) => Some(format!("{} ({})", email, name.trim())),
        }
    }

    fn atom_person(&self, name: &str) -> atom::Person {
        let mut person = atom::Person::default();
        person.set_name(name.trim());
        if !self.config.author.email.is_empty() {
            person.set_email(Some(self.config.author.email.clone()));
        }
        person
    }

    fn atom_link(&self, href: String) -> atom::Link {
        let mut link = atom::Link::default();
        link.set_href(href);
        link.set_rel("alternate");
        link
    }

    /// Build the Atom document
    pub fn atom(&self, posts: &Posts) -> Result<atom::Feed> {
        let updated = newest(posts)?.date.at;

        let mut feed = atom::Feed::default();
        feed.set_title(self.config.title.as_str());
        feed.set_id(self.config.link.as_str());
        feed.set_updated(updated);
        feed.set_links(vec![self.atom_link(self.config.link.clone())]);
        feed.set_authors(vec![self.atom_person(&self.config.author.name)]);
        if !self.config.description.is_empty() {
            feed.set_subtitle(Some(atom::Text::plain(self.config.description.as_str())));
        }
        if !self.config.copyright.is_empty() {
            feed.set_rights(Some(atom::Text::plain(self.config.copyright.as_str())));
        }
        feed.set_entries(posts.iter().map(|p| self.atom_entry(p)).collect::<Vec<_>>());
        Ok(feed)
    }

    fn atom_entry(&self, post: &Post) -> atom::Entry {
        let link = self.link_for(&post.url);

        let mut content = atom::Content::default();
        content.set_content_type(Some("html".to_string()));
        content.set_value(Some(post.body.clone()));

        let mut entry = atom::Entry::default();
        entry.set_title(post.title.as_str());
        entry.set_id(link.as_str());
        entry.set_updated(post.date.at);
        entry.set_published(Some(post.date.at));
        entry.set_authors(vec![self.atom_person(&post.author.full_name())]);
        entry.set_links(vec![self.atom_link(link)]);
        entry.set_content(Some(content));
        entry
    }

    /// Build the RSS document
    pub fn rss(&self, posts: &Posts) -> Result<rss::Channel> {
        let updated = newest(posts)?.date.at.to_rfc2822();

        let mut channel = rss::Channel::default();
        channel.set_title(self.config.title.as_str());
        channel.set_link(self.config.link.as_str());
        channel.set_description(self.config.description.as_str());
        channel.set_managing_editor(self.rss_person(&self.config.author.name));
        if !self.config.copyright.is_empty() {
            channel.set_copyright(Some(self.config.copyright.clone()));
        }
        channel.set_pub_date(Some(updated));
        channel.set_items(posts.iter().map(|p| self.rss_item(p)).collect::<Vec<_>>());
        Ok(channel)
    }

    fn rss_item(&self, post: &Post) -> rss::Item {
        let link = self.link_for(&post.url);

        let mut guid = rss::Guid::default();
        guid.set_value(link.as_str());
        guid.set_permalink(true);

        let mut item = rss::Item::default();
        item.set_title(Some(post.title.clone()));
        item.set_link(Some(link));
        item.set_description(Some(post.body.clone()));
        item.set_author(self.rss_person(&post.author.full_name()));
        item.set_pub_date(Some(post.date.at.to_rfc2822()));
        item.set_guid(Some(guid));
        item
    }

    /// Write `atom.xml` into `dst`
    pub fn write_atom(&self, posts: &Posts, dst: &Path) -> Result<()> {
        let feed = self.atom(posts)?;
        let path = dst.join("atom.xml");
        let writer = create(&path)?;
        let mut writer = feed.write_to(writer).map_err(|e| feed_error(&path, e))?;
        writer.flush().map_err(|e| Error::io(&path, e))?;
        tracing::info!("Generated atom.xml");
        Ok(())
    }

    /// Write `rss.xml` into `dst`
    pub fn write_rss(&self, posts: &Posts, dst: &Path) -> Result<()> {
        let channel = self.rss(posts)?;
        let path = dst.join("rss.xml");
        let writer = create(&path)?;
        let mut writer = channel.write_to(writer).map_err(|e| feed_error(&path, e))?;
        writer.flush().map_err(|e| Error::io(&path, e))?;
        tracing::info!("Generated rss.xml");
        Ok(())
    }
}

fn newest(posts: &Posts) -> Result<&Post> {
    posts
        .newest()
        .ok_or_else(|| Error::NoPosts(Path::new("").to_path_buf()))
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| Error::io(path, e))
}

fn feed_error(path: &Path, e: impl std::fmt::Display) -> Error {
    Error::Feed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}
