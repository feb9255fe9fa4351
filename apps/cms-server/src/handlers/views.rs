//! Conversions between domain types and wire DTOs.

use pharmacy_core::access::NavItem;
use pharmacy_core::domain::{Category, Post, Profile};
use pharmacy_core::editor::{EXCERPT_RECOMMENDED_CHARS, PostEditor, PostForm, SaveAction, SeoForm};
use pharmacy_core::images::preview_src;
use pharmacy_shared::dto::{
    CategoryResponse, EditorResponse, NavItemResponse, PostFormRequest, PostResponse,
    PostSummary, ProfileResponse, SubmitAction,
};

pub fn post_response(post: &Post) -> PostResponse {
    PostResponse {
        id: post.id,
        slug: post.slug.clone(),
        title: post.title.clone(),
        excerpt: post.excerpt.clone(),
        content: post.content.clone(),
        status: post.status.to_string(),
        published_at: post.published_at,
        author_id: post.author_id,
        author_name: post.author_name.clone(),
        category: post.category.clone(),
        featured_image: post.featured_image.clone(),
        read_time: post.read_time.clone(),
        seo_title: post.seo.title.clone(),
        seo_description: post.seo.description.clone(),
        seo_canonical: post.seo.canonical.clone(),
        og_image: post.seo.og_image.clone(),
        no_index: post.seo.no_index,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

pub fn post_summary(post: &Post) -> PostSummary {
    PostSummary {
        id: post.id,
        title: post.title.clone(),
        slug: post.slug.clone(),
        status: post.status.to_string(),
        category: post.category.clone(),
        author_name: post.author_name.clone(),
        published_at: post.published_at,
        created_at: post.created_at,
    }
}

pub fn profile_response(profile: &Profile) -> ProfileResponse {
    ProfileResponse {
        id: profile.id,
        email: profile.email.clone(),
        full_name: profile.full_name.clone(),
        avatar_url: profile.avatar_url.clone(),
        initials: profile.initials(),
        role: profile.role.map(|r| r.as_str().to_string()),
        role_label: profile.role.map(|r| r.label().to_string()),
        created_at: profile.created_at,
    }
}

pub fn nav_items(items: Vec<NavItem>) -> Vec<NavItemResponse> {
    items
        .into_iter()
        .map(|item| NavItemResponse {
            name: item.name.to_string(),
            href: item.href.to_string(),
            active: item.active,
        })
        .collect()
}

/// Split a submission into editor values and the button that was pressed.
pub fn editor_form(request: PostFormRequest) -> (PostForm, SaveAction) {
    let action = match request.action {
        SubmitAction::Draft => SaveAction::Draft,
        SubmitAction::Publish => SaveAction::Publish,
    };

    let form = PostForm {
        title: request.title,
        slug: request.slug,
        excerpt: request.excerpt,
        content: request.content,
        category: request.category,
        featured_image: request.featured_image,
        seo: SeoForm {
            title: request.seo_title,
            description: request.seo_description,
            canonical: request.seo_canonical,
            og_image: request.og_image,
            no_index: request.no_index,
        },
    };

    (form, action)
}

pub fn form_request(form: &PostForm, action: SubmitAction) -> PostFormRequest {
    PostFormRequest {
        title: form.title.clone(),
        slug: form.slug.clone(),
        excerpt: form.excerpt.clone(),
        content: form.content.clone(),
        category: form.category.clone(),
        featured_image: form.featured_image.clone(),
        seo_title: form.seo.title.clone(),
        seo_description: form.seo.description.clone(),
        seo_canonical: form.seo.canonical.clone(),
        og_image: form.seo.og_image.clone(),
        no_index: form.seo.no_index,
        action,
    }
}

pub fn editor_response(
    editor: &PostEditor,
    categories: &[Category],
    author_name: &str,
) -> EditorResponse {
    let form = editor.form();
    EditorResponse {
        post_id: editor.post_id(),
        status: editor.status().to_string(),
        slug_linked: editor.slug_is_linked(),
        form: form_request(form, SubmitAction::default()),
        categories: categories
            .iter()
            .map(|c| CategoryResponse {
                id: c.id,
                name: c.name.clone(),
                slug: c.slug.clone(),
            })
            .collect(),
        author_name: author_name.to_string(),
        excerpt_length: editor.excerpt_length(),
        excerpt_recommended: EXCERPT_RECOMMENDED_CHARS,
        featured_image_preview: preview_src(Some(form.featured_image.as_str())).to_string(),
    }
}
