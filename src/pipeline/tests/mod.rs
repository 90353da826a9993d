mod test_resolvers;
