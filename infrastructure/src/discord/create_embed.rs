use domain::ports::discord::CreateEmbed;
use poise::serenity_prelude as serenity;

pub fn domain_to_serenity_create_embed(embed: CreateEmbed) -> serenity::CreateEmbed {
    let CreateEmbed {
        title,
        description,
        colour,
    } = embed;

    let mut embed = serenity::CreateEmbed::new();

    if let Some(title) = title {
        embed = embed.title(title);
    }
    if let Some(description) = description {
        embed = embed.description(description);
    }
    if let Some(colour) = colour {
        embed = embed.colour(colour);
    }

    embed
}
